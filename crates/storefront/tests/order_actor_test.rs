use actor_framework::mock::{create_mock_client, MockClient};
use actor_framework::{FrameworkError, ResourceActor, ResourceClient, ResourceRequest};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use storefront::clients::{CartClient, OrderClient, ProductClient, UserClient};
use storefront::error::ErrorKind;
use storefront::model::{
    CartLine, CartLineId, Lifecycle, Product, ProductCreate, ProductId, Role, ShippingInfo,
    User, UserId,
};
use storefront::order_actor::{self, OrderContext, OrderError};
use storefront::product_actor::{ProductAction, ProductActionResult, ProductError};

fn buyer(id: u32) -> User {
    User {
        id: UserId(id),
        name: "Bob".into(),
        email: "bob@example.com".into(),
        role: Role::Customer,
        is_system: false,
        enabled: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn product(id: u32, name: &str, cents: i64, stock: u32) -> Product {
    Product {
        id: ProductId(id),
        name: name.into(),
        description: String::new(),
        price: Decimal::new(cents, 2),
        stock,
        image_url: None,
        lifecycle: Lifecycle::Active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn line(id: u32, product: u32, quantity: u32) -> CartLine {
    CartLine {
        id: CartLineId(id),
        user_id: UserId(1),
        product_id: ProductId(product),
        quantity,
        selected: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn shipping() -> ShippingInfo {
    ShippingInfo {
        name: "Bob".into(),
        phone: "0901234567".into(),
        address: "1 Main St".into(),
    }
}

struct Harness {
    users: MockClient<User>,
    products: MockClient<Product>,
    carts: MockClient<CartLine>,
}

impl Harness {
    fn new() -> Self {
        Self {
            users: MockClient::new(),
            products: MockClient::new(),
            carts: MockClient::new(),
        }
    }

    /// Spawns a real Order actor whose dependencies are the mocks.
    fn spawn(&self) -> (OrderClient, tokio::task::JoinHandle<()>) {
        let products = ProductClient::new(self.products.client());
        let context = OrderContext {
            users: UserClient::new(self.users.client()),
            products: products.clone(),
            carts: CartClient::new(self.carts.client(), products),
        };
        let (actor, orders) = order_actor::new(8);
        (orders, tokio::spawn(actor.run(context)))
    }

    fn verify(&self) {
        self.users.verify();
        self.products.verify();
        self.carts.verify();
    }
}

/// Real Order actor, mocked collaborators: the checkout hook's call sequence.
#[tokio::test]
async fn checkout_reserves_then_consumes_cart_lines() {
    let mut h = Harness::new();
    h.users.expect_get(UserId(1)).return_ok(Some(buyer(1)));
    h.carts
        .expect_list()
        .return_ok(vec![line(10, 1, 2), line(11, 2, 1)]);
    h.products
        .expect_get(ProductId(1))
        .return_ok(Some(product(1, "Mug", 1250, 5)));
    h.products
        .expect_get(ProductId(2))
        .return_ok(Some(product(2, "Tea", 400, 1)));
    h.products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::ReserveStock(3));
    h.products
        .expect_action(ProductId(2))
        .return_ok(ProductActionResult::ReserveStock(0));
    h.carts
        .expect_delete_many()
        .return_ok(vec![CartLineId(10), CartLineId(11)]);

    let (orders, handle) = h.spawn();
    let placed_at = Utc.timestamp_millis_opt(1_700_000_000_042).unwrap();
    let order = orders
        .checkout_at(UserId(1), shipping(), placed_at)
        .await
        .unwrap();

    assert_eq!(order.code.as_str(), "ORD-231114-000042");
    assert_eq!(order.user.name, "Bob");
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[1].product_name, "Tea");
    assert_eq!(order.total_amount, Decimal::new(2900, 2));
    assert_eq!(order.created_at, placed_at);
    h.verify();

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn lost_reservation_releases_what_was_taken() {
    let mut h = Harness::new();
    h.users.expect_get(UserId(1)).return_ok(Some(buyer(1)));
    h.carts
        .expect_list()
        .return_ok(vec![line(10, 1, 2), line(11, 2, 1)]);
    h.products
        .expect_get(ProductId(1))
        .return_ok(Some(product(1, "Mug", 1250, 5)));
    h.products
        .expect_get(ProductId(2))
        .return_ok(Some(product(2, "Tea", 400, 1)));
    h.products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::ReserveStock(3));
    h.products
        .expect_action(ProductId(2))
        .return_err(FrameworkError::EntityError(Box::new(
            ProductError::InsufficientStock {
                name: "Tea".into(),
                requested: 1,
                available: 0,
            },
        )));
    h.products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::ReleaseStock(5));

    let (orders, handle) = h.spawn();
    let err = orders.checkout(UserId(1), shipping()).await.unwrap_err();

    assert_eq!(err, OrderError::ReservationLost("Tea".into()));
    assert!(orders.orders().await.unwrap().is_empty());
    h.verify();

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn failed_cart_cleanup_rolls_back_stock() {
    let mut h = Harness::new();
    h.users.expect_get(UserId(1)).return_ok(Some(buyer(1)));
    h.carts.expect_list().return_ok(vec![line(10, 1, 2)]);
    h.products
        .expect_get(ProductId(1))
        .return_ok(Some(product(1, "Mug", 1250, 5)));
    h.products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::ReserveStock(3));
    h.carts
        .expect_delete_many()
        .return_err(FrameworkError::ActorClosed);
    h.products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::ReleaseStock(5));

    let (orders, handle) = h.spawn();
    let err = orders.checkout(UserId(1), shipping()).await.unwrap_err();

    assert!(matches!(err, OrderError::ActorCommunicationError(_)));
    assert!(orders.orders().await.unwrap().is_empty());
    h.verify();

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn missing_product_fails_before_any_reservation() {
    let mut h = Harness::new();
    h.users.expect_get(UserId(1)).return_ok(Some(buyer(1)));
    h.carts.expect_list().return_ok(vec![line(10, 7, 1)]);
    h.products.expect_get(ProductId(7)).return_ok(None);

    let (orders, handle) = h.spawn();
    let err = orders.checkout(UserId(1), shipping()).await.unwrap_err();

    assert_eq!(err, OrderError::ProductNotFound(ProductId(7)));
    h.verify();

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn disabled_buyer_stops_at_the_first_step() {
    let mut h = Harness::new();
    let mut user = buyer(1);
    user.enabled = false;
    h.users.expect_get(UserId(1)).return_ok(Some(user));

    let (orders, handle) = h.spawn();
    let err = orders.checkout(UserId(1), shipping()).await.unwrap_err();

    assert_eq!(err, OrderError::UserDisabled(UserId(1)));
    h.verify();

    drop(orders);
    handle.await.unwrap();
}

/// Serves catalog requests from the real product actor. Right before the first
/// reservation on `trigger` is applied, a competing writer takes `rival` stock.
fn catalog_with_rival(
    catalog: ResourceClient<Product>,
    trigger: ProductId,
    rival: (ProductId, u32),
) -> ProductClient {
    let (client, mut requests) = create_mock_client::<Product>(16);
    tokio::spawn(async move {
        let mut rival = Some(rival);
        while let Some(request) = requests.recv().await {
            match request {
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(catalog.get(id).await);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    let reserving = matches!(action, ProductAction::ReserveStock(_));
                    if id == trigger && reserving {
                        if let Some((product, quantity)) = rival.take() {
                            catalog
                                .perform_action(product, ProductAction::ReserveStock(quantity))
                                .await
                                .unwrap();
                        }
                    }
                    let _ = respond_to.send(catalog.perform_action(id, action).await);
                }
                other => panic!("unexpected catalog request: {other:?}"),
            }
        }
    });
    ProductClient::new(client)
}

/// Real Order and Product actors: stock moves between validation and reservation.
#[tokio::test]
async fn stock_taken_after_validation_is_a_conflict_and_rolls_back() {
    let (product_actor, raw_catalog) = ResourceActor::<Product>::new(8);
    tokio::spawn(product_actor.run(()));
    let catalog = ProductClient::new(raw_catalog.clone());
    let mut ids = Vec::new();
    for (name, stock) in [("Mug", 5), ("Tea", 3)] {
        let id = catalog
            .create_product(ProductCreate {
                name: name.into(),
                description: format!("{name} from the shelf"),
                price: Decimal::new(500, 2),
                stock: Some(stock),
                image_url: None,
            })
            .await
            .unwrap();
        ids.push(id);
    }
    let (mug, tea) = (ids[0], ids[1]);

    let mut users = MockClient::<User>::new();
    users.expect_get(UserId(1)).return_ok(Some(buyer(1)));
    let mut carts = MockClient::<CartLine>::new();
    carts
        .expect_list()
        .return_ok(vec![line(10, mug.0, 2), line(11, tea.0, 3)]);

    // Validation sees 3 Tea; by the time Tea is reserved only 1 is left.
    let products = catalog_with_rival(raw_catalog, mug, (tea, 2));
    let context = OrderContext {
        users: UserClient::new(users.client()),
        products: products.clone(),
        carts: CartClient::new(carts.client(), products),
    };
    let (actor, orders) = order_actor::new(8);
    let handle = tokio::spawn(actor.run(context));

    let err = orders.checkout(UserId(1), shipping()).await.unwrap_err();

    assert_eq!(err, OrderError::ReservationLost("Tea".into()));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(catalog.check_stock(mug).await.unwrap(), 5);
    assert_eq!(catalog.check_stock(tea).await.unwrap(), 1);
    assert!(orders.orders().await.unwrap().is_empty());
    users.verify();
    carts.verify();

    drop(orders);
    handle.await.unwrap();
}
