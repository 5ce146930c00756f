//! 订单生命周期集成测试
//!
//! In-memory database, full checkout and workflow paths: cart to order,
//! numbering, status transitions, table coupling, tenant scoping.

use order_server::db::models::{DiningTable, MenuItem, Restaurant, RestaurantSettings};
use order_server::db::repository::{
    DiningTableRepository, MenuItemRepository, OrderRepository, RestaurantRepository, TenantScope,
    UserRepository,
};
use order_server::orders::{Cart, CheckoutService, OrderWorkflow};
use order_server::{Config, ServerState};
use shared::{ErrorCode, MenuCategory, OrderStatus, TableLocation, TableStatus};

fn now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

async fn setup() -> ServerState {
    ServerState::initialize_in_memory(&Config::from_env()).await
}

async fn seed_restaurant(state: &ServerState, name: &str, subdomain: &str) -> Restaurant {
    let repo = RestaurantRepository::new(state.db.clone());
    repo.create(Restaurant {
        id: None,
        name: name.to_string(),
        slug: Restaurant::generate_slug(name),
        subdomain: subdomain.to_string(),
        address: String::new(),
        phone: String::new(),
        email: String::new(),
        is_active: true,
        created_by: None,
        settings: RestaurantSettings::default(),
        created_at: now(),
        updated_at: now(),
    })
    .await
    .expect("seed restaurant")
}

async fn seed_table(state: &ServerState, restaurant: &Restaurant, number: &str) -> DiningTable {
    let repo = DiningTableRepository::new(state.db.clone());
    repo.create(DiningTable {
        id: None,
        restaurant: restaurant.id_string(),
        table_number: number.to_string(),
        capacity: 4,
        location: TableLocation::Indoor,
        status: TableStatus::Available,
        is_active: true,
        current_order: None,
        notes: String::new(),
        created_at: now(),
        updated_at: now(),
    })
    .await
    .expect("seed table")
}

async fn seed_menu_item(
    state: &ServerState,
    restaurant: &Restaurant,
    name: &str,
    price: f64,
) -> MenuItem {
    let repo = MenuItemRepository::new(state.db.clone());
    repo.create(MenuItem {
        id: None,
        restaurant: restaurant.id_string(),
        name: name.to_string(),
        description: String::new(),
        price,
        category: MenuCategory::MainCourse,
        image: None,
        model_glb: None,
        model_usdz: None,
        is_vegetarian: false,
        is_vegan: false,
        is_gluten_free: false,
        spice_level: 0,
        preparation_time: 15,
        is_available: true,
        tags: Vec::new(),
        allergens: Vec::new(),
        sort_order: 0,
        created_at: now(),
        updated_at: now(),
    })
    .await
    .expect("seed menu item")
}

/// Cart with Item A (10.00 x2) and Item B (5.00 x1)
fn two_line_cart(item_a: &MenuItem, item_b: &MenuItem) -> Cart {
    let mut cart = Cart::new();
    cart.add_item(&item_a.id_string(), &item_a.name, item_a.price, 2, "")
        .unwrap();
    cart.add_item(&item_b.id_string(), &item_b.name, item_b.price, 1, "")
        .unwrap();
    cart
}

fn scope_of(restaurant: &Restaurant) -> TenantScope {
    TenantScope::Restaurant(restaurant.id_string())
}

#[tokio::test]
async fn test_place_order_scenario() {
    let state = setup().await;
    let restaurant = seed_restaurant(&state, "Golden Dragon", "golden").await;
    let table = seed_table(&state, &restaurant, "5").await;
    let item_a = seed_menu_item(&state, &restaurant, "Item A", 10.0).await;
    let item_b = seed_menu_item(&state, &restaurant, "Item B", 5.0).await;

    let checkout = CheckoutService::new(state.db.clone());
    let cart = two_line_cart(&item_a, &item_b);
    let (order, customer) = checkout
        .place_order(&restaurant, &table, &cart, "5551234567", "rush please")
        .await
        .expect("place order");

    // Totals: 25.00 / 2.50 / 27.50
    assert!((order.subtotal - 25.0).abs() < 1e-9);
    assert!((order.tax - 2.5).abs() < 1e-9);
    assert!((order.total - 27.5).abs() < 1e-9);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.customer_phone, "5551234567");
    assert_eq!(order.notes, "rush please");
    assert_eq!(order.customer.as_deref(), Some(customer.id_string().as_str()));

    // Number format: ORD-YYYYMMDD-0001
    let parts: Vec<&str> = order.order_number.split('-').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "ORD");
    assert_eq!(parts[1].len(), 8);
    assert_eq!(parts[2], "0001");

    // Table "5" is occupied and points at the order
    let tables = DiningTableRepository::new(state.db.clone());
    let table = tables
        .find_by_id(&scope_of(&restaurant), &table.id_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(table.status, TableStatus::Occupied);
    assert_eq!(table.current_order.as_deref(), Some(order.id_string().as_str()));
}

#[tokio::test]
async fn test_full_lifecycle_to_done() {
    let state = setup().await;
    let restaurant = seed_restaurant(&state, "Golden Dragon", "golden").await;
    let table = seed_table(&state, &restaurant, "5").await;
    let item = seed_menu_item(&state, &restaurant, "Item A", 10.0).await;

    let mut cart = Cart::new();
    cart.add_item(&item.id_string(), &item.name, item.price, 1, "").unwrap();
    let checkout = CheckoutService::new(state.db.clone());
    let (order, _) = checkout
        .place_order(&restaurant, &table, &cart, "5551234567", "")
        .await
        .unwrap();

    let scope = scope_of(&restaurant);
    let workflow = OrderWorkflow::new(state.db.clone());
    let order_id = order.id_string();

    // Each step appends exactly one history entry
    let order = workflow
        .transition(&scope, &order_id, OrderStatus::Preparing, "user:staff1")
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Preparing);
    assert_eq!(order.status_history.len(), 1);
    assert!(order.completed_at.is_none());

    let order = workflow
        .transition(&scope, &order_id, OrderStatus::Served, "user:staff1")
        .await
        .unwrap();
    assert_eq!(order.status_history.len(), 2);

    let order = workflow
        .transition(&scope, &order_id, OrderStatus::Done, "user:staff1")
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Done);
    assert_eq!(order.status_history.len(), 3);
    assert!(order.completed_at.is_some());
    assert_eq!(
        order.status_history.last().unwrap().updated_by.as_deref(),
        Some("user:staff1")
    );

    // Totals survive the mutations
    assert!((order.total - (order.subtotal + order.tax)).abs() < 1e-9);

    // Table released
    let tables = DiningTableRepository::new(state.db.clone());
    let table = tables
        .find_by_id(&scope, &table.id_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(table.status, TableStatus::Available);
    assert!(table.current_order.is_none());
}

#[tokio::test]
async fn test_cancel_releases_table() {
    let state = setup().await;
    let restaurant = seed_restaurant(&state, "Golden Dragon", "golden").await;
    let table = seed_table(&state, &restaurant, "7").await;
    let item = seed_menu_item(&state, &restaurant, "Item A", 10.0).await;

    let mut cart = Cart::new();
    cart.add_item(&item.id_string(), &item.name, item.price, 1, "").unwrap();
    let checkout = CheckoutService::new(state.db.clone());
    let (order, _) = checkout
        .place_order(&restaurant, &table, &cart, "5551234567", "")
        .await
        .unwrap();

    let scope = scope_of(&restaurant);
    let workflow = OrderWorkflow::new(state.db.clone());
    let order = workflow
        .transition(&scope, &order.id_string(), OrderStatus::Cancelled, "user:staff1")
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Cancelled);
    // Cancellation is terminal but not a completion
    assert!(order.completed_at.is_none());

    let tables = DiningTableRepository::new(state.db.clone());
    let table = tables
        .find_by_id(&scope, &table.id_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(table.status, TableStatus::Available);
    assert!(table.current_order.is_none());
}

#[tokio::test]
async fn test_invalid_transition_rejected_without_mutation() {
    let state = setup().await;
    let restaurant = seed_restaurant(&state, "Golden Dragon", "golden").await;
    let table = seed_table(&state, &restaurant, "5").await;
    let item = seed_menu_item(&state, &restaurant, "Item A", 10.0).await;

    let mut cart = Cart::new();
    cart.add_item(&item.id_string(), &item.name, item.price, 1, "").unwrap();
    let checkout = CheckoutService::new(state.db.clone());
    let (order, _) = checkout
        .place_order(&restaurant, &table, &cart, "5551234567", "")
        .await
        .unwrap();

    let scope = scope_of(&restaurant);
    let workflow = OrderWorkflow::new(state.db.clone());

    // pending -> done skips the workflow; rejected
    let err = workflow
        .transition(&scope, &order.id_string(), OrderStatus::Done, "user:staff1")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStatusTransition);

    // Order and table unchanged
    let orders = OrderRepository::new(state.db.clone());
    let unchanged = orders
        .find_by_id(&scope, &order.id_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.status, OrderStatus::Pending);
    assert!(unchanged.status_history.is_empty());

    let tables = DiningTableRepository::new(state.db.clone());
    let table = tables
        .find_by_id(&scope, &table.id_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(table.status, TableStatus::Occupied);
}

#[tokio::test]
async fn test_sequential_numbering_same_day() {
    let state = setup().await;
    let restaurant = seed_restaurant(&state, "Golden Dragon", "golden").await;
    let table_a = seed_table(&state, &restaurant, "1").await;
    let table_b = seed_table(&state, &restaurant, "2").await;
    let item = seed_menu_item(&state, &restaurant, "Item A", 10.0).await;

    let checkout = CheckoutService::new(state.db.clone());
    let mut cart = Cart::new();
    cart.add_item(&item.id_string(), &item.name, item.price, 1, "").unwrap();

    let (first, _) = checkout
        .place_order(&restaurant, &table_a, &cart, "5550000001", "")
        .await
        .unwrap();
    let (second, _) = checkout
        .place_order(&restaurant, &table_b, &cart, "5550000002", "")
        .await
        .unwrap();

    assert!(first.order_number.ends_with("-0001"));
    assert!(second.order_number.ends_with("-0002"));
    assert_ne!(first.order_number, second.order_number);
}

#[tokio::test]
async fn test_order_number_collision_is_detected() {
    let state = setup().await;
    let restaurant = seed_restaurant(&state, "Golden Dragon", "golden").await;
    let table_a = seed_table(&state, &restaurant, "1").await;
    let table_b = seed_table(&state, &restaurant, "2").await;
    let item = seed_menu_item(&state, &restaurant, "Item A", 10.0).await;

    let checkout = CheckoutService::new(state.db.clone());
    let mut cart = Cart::new();
    cart.add_item(&item.id_string(), &item.name, item.price, 1, "").unwrap();
    let (first, _) = checkout
        .place_order(&restaurant, &table_a, &cart, "5550000001", "")
        .await
        .unwrap();

    // Replay the losing side of the count-then-insert race: same number,
    // direct repository write with no retry loop on top.
    let orders = OrderRepository::new(state.db.clone());
    let scope = scope_of(&restaurant);
    let mut duplicate = orders
        .find_by_id(&scope, &first.id_string())
        .await
        .unwrap()
        .unwrap();
    duplicate.id = None;
    duplicate.table = table_b.id_string();
    let key = uuid::Uuid::new_v4().simple().to_string();
    let err = orders
        .create_with_table_occupy(&key, duplicate)
        .await
        .unwrap_err();
    let app: shared::AppError = err.into();
    assert_eq!(app.code, ErrorCode::AlreadyExists);

    // The losing transaction left no trace on its table
    let table_b_after = DiningTableRepository::new(state.db.clone())
        .find_by_id(&scope, &table_b.id_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(table_b_after.status, TableStatus::Available);
    assert!(table_b_after.current_order.is_none());
}

#[tokio::test]
async fn test_checkout_preconditions() {
    let state = setup().await;
    let restaurant = seed_restaurant(&state, "Golden Dragon", "golden").await;
    let table = seed_table(&state, &restaurant, "5").await;
    let item = seed_menu_item(&state, &restaurant, "Item A", 10.0).await;

    let checkout = CheckoutService::new(state.db.clone());

    // Empty cart
    let err = checkout
        .place_order(&restaurant, &table, &Cart::new(), "5551234567", "")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CartEmpty);

    // Missing phone
    let mut cart = Cart::new();
    cart.add_item(&item.id_string(), &item.name, item.price, 1, "").unwrap();
    let err = checkout
        .place_order(&restaurant, &table, &cart, "  ", "")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PhoneRequired);

    // Inactive restaurant
    let mut inactive = restaurant.clone();
    inactive.is_active = false;
    let err = checkout
        .place_order(&inactive, &table, &cart, "5551234567", "")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RestaurantInactive);
}

#[tokio::test]
async fn test_customer_find_or_create_by_phone() {
    let state = setup().await;
    let restaurant = seed_restaurant(&state, "Golden Dragon", "golden").await;
    let table_a = seed_table(&state, &restaurant, "1").await;
    let table_b = seed_table(&state, &restaurant, "2").await;
    let item = seed_menu_item(&state, &restaurant, "Item A", 10.0).await;

    let checkout = CheckoutService::new(state.db.clone());
    let mut cart = Cart::new();
    cart.add_item(&item.id_string(), &item.name, item.price, 1, "").unwrap();

    let (_, customer_first) = checkout
        .place_order(&restaurant, &table_a, &cart, "5559998888", "")
        .await
        .unwrap();
    let (_, customer_second) = checkout
        .place_order(&restaurant, &table_b, &cart, "5559998888", "")
        .await
        .unwrap();

    // Same phone within one restaurant resolves to the same customer
    assert_eq!(customer_first.id_string(), customer_second.id_string());
    assert_eq!(customer_first.name, "Customer 8888");

    // A different restaurant gets its own customer for the same phone
    let other = seed_restaurant(&state, "Blue Lotus", "lotus").await;
    let users = UserRepository::new(state.db.clone());
    let other_customer = users
        .find_or_create_customer(&other.id_string(), "5559998888")
        .await
        .unwrap();
    assert_ne!(other_customer.id_string(), customer_first.id_string());
}

#[tokio::test]
async fn test_tenant_scoping_hides_foreign_orders() {
    let state = setup().await;
    let restaurant_a = seed_restaurant(&state, "Golden Dragon", "golden").await;
    let restaurant_b = seed_restaurant(&state, "Blue Lotus", "lotus").await;
    let table = seed_table(&state, &restaurant_a, "5").await;
    let item = seed_menu_item(&state, &restaurant_a, "Item A", 10.0).await;

    let checkout = CheckoutService::new(state.db.clone());
    let mut cart = Cart::new();
    cart.add_item(&item.id_string(), &item.name, item.price, 1, "").unwrap();
    let (order, _) = checkout
        .place_order(&restaurant_a, &table, &cart, "5551234567", "")
        .await
        .unwrap();

    let orders = OrderRepository::new(state.db.clone());

    // Restaurant B's scope cannot see A's order; superadmin can
    let foreign = orders
        .find_by_id(&scope_of(&restaurant_b), &order.id_string())
        .await
        .unwrap();
    assert!(foreign.is_none());

    let own = orders
        .find_by_id(&scope_of(&restaurant_a), &order.id_string())
        .await
        .unwrap();
    assert!(own.is_some());

    let global = orders
        .find_by_id(&TenantScope::Global, &order.id_string())
        .await
        .unwrap();
    assert!(global.is_some());

    // The workflow reports foreign orders as missing too
    let workflow = OrderWorkflow::new(state.db.clone());
    let err = workflow
        .transition(
            &scope_of(&restaurant_b),
            &order.id_string(),
            OrderStatus::Preparing,
            "user:intruder",
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn test_manual_table_override_clears_current_order() {
    let state = setup().await;
    let restaurant = seed_restaurant(&state, "Golden Dragon", "golden").await;
    let table = seed_table(&state, &restaurant, "5").await;
    let item = seed_menu_item(&state, &restaurant, "Item A", 10.0).await;

    let checkout = CheckoutService::new(state.db.clone());
    let mut cart = Cart::new();
    cart.add_item(&item.id_string(), &item.name, item.price, 1, "").unwrap();
    let (order, _) = checkout
        .place_order(&restaurant, &table, &cart, "5551234567", "")
        .await
        .unwrap();

    let scope = scope_of(&restaurant);
    let tables = DiningTableRepository::new(state.db.clone());

    // Forcing available clears the reference even though the order is live
    let table = tables
        .set_status(&scope, &table.id_string(), TableStatus::Available)
        .await
        .unwrap();
    assert_eq!(table.status, TableStatus::Available);
    assert!(table.current_order.is_none());

    // The order itself is untouched by the override
    let orders = OrderRepository::new(state.db.clone());
    let order = orders
        .find_by_id(&scope, &order.id_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);

    // Other manual statuses keep the reference
    let table = tables
        .set_status(&scope, &table.id_string(), TableStatus::Cleaning)
        .await
        .unwrap();
    assert_eq!(table.status, TableStatus::Cleaning);
}

#[tokio::test]
async fn test_table_number_unique_per_restaurant() {
    let state = setup().await;
    let restaurant_a = seed_restaurant(&state, "Golden Dragon", "golden").await;
    let restaurant_b = seed_restaurant(&state, "Blue Lotus", "lotus").await;
    seed_table(&state, &restaurant_a, "5").await;

    // Same number in another restaurant is fine
    seed_table(&state, &restaurant_b, "5").await;

    // Same number in the same restaurant is a conflict
    let repo = DiningTableRepository::new(state.db.clone());
    let err = repo
        .create(DiningTable {
            id: None,
            restaurant: restaurant_a.id_string(),
            table_number: "5".to_string(),
            capacity: 2,
            location: TableLocation::Indoor,
            status: TableStatus::Available,
            is_active: true,
            current_order: None,
            notes: String::new(),
            created_at: now(),
            updated_at: now(),
        })
        .await
        .unwrap_err();
    let app: shared::AppError = err.into();
    assert_eq!(app.code, ErrorCode::AlreadyExists);
}

#[tokio::test]
async fn test_unavailable_item_hidden_from_customer_menu() {
    let state = setup().await;
    let restaurant = seed_restaurant(&state, "Golden Dragon", "golden").await;
    let item = seed_menu_item(&state, &restaurant, "Item A", 10.0).await;

    let repo = MenuItemRepository::new(state.db.clone());
    let scope = scope_of(&restaurant);

    let mut unavailable = item.clone();
    unavailable.is_available = false;
    repo.update(&scope, &item.id_string(), unavailable)
        .await
        .unwrap();

    // Gone from the customer menu and the cart-add path
    let menu = repo.find_available(&restaurant.id_string()).await.unwrap();
    assert!(menu.is_empty());
    let for_cart = repo
        .find_available_by_id(&restaurant.id_string(), &item.id_string())
        .await
        .unwrap();
    assert!(for_cart.is_none());

    // Still present for the admin
    let all = repo.find_all(&scope).await.unwrap();
    assert_eq!(all.len(), 1);
}
