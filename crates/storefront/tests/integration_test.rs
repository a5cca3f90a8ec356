use actor_framework::ActorClient;
use rust_decimal::Decimal;
use storefront::cart_actor::CartError;
use storefront::config::StorefrontConfig;
use storefront::error::ErrorKind;
use storefront::lifecycle::Storefront;
use storefront::model::{
    AddToCart, CartLineUpdate, OrderStatus, ProductCreate, ProductId, ProductUpdate, Role,
    RootAdmin, ShippingInfo, UserCreate, UserId, UserUpdate,
};
use storefront::order_actor::OrderError;
use storefront::product_actor::ProductError;
use storefront::user_actor::UserError;

fn shipping() -> ShippingInfo {
    ShippingInfo {
        name: "Bob Buyer".to_string(),
        phone: "+84901234567".to_string(),
        address: "12 Harbour Road".to_string(),
    }
}

async fn product(store: &Storefront, name: &str, cents: i64, stock: u32) -> ProductId {
    store
        .products
        .create_product(ProductCreate {
            name: name.to_string(),
            description: format!("{name} description"),
            price: Decimal::new(cents, 2),
            stock: Some(stock),
            image_url: None,
        })
        .await
        .unwrap()
}

async fn customer(store: &Storefront, name: &str) -> UserId {
    store
        .users
        .register(UserCreate {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            role: None,
        })
        .await
        .unwrap()
}

/// End to end: real actors, one customer, one order.
#[tokio::test]
async fn checkout_takes_stock_empties_cart_and_snapshots_prices() {
    let store = Storefront::start(&StorefrontConfig::default()).await.unwrap();
    let bob = customer(&store, "bob").await;
    let mug = product(&store, "Mug", 1250, 5).await;
    let tea = product(&store, "Tea", 400, 10).await;

    store
        .carts
        .add_to_cart(
            bob,
            AddToCart {
                product_id: mug,
                quantity: 2,
            },
        )
        .await
        .unwrap();
    store
        .carts
        .add_to_cart(
            bob,
            AddToCart {
                product_id: tea,
                quantity: 3,
            },
        )
        .await
        .unwrap();

    let order = store.orders.checkout(bob, shipping()).await.unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.user.id, bob);
    assert_eq!(order.user.email, "bob@example.com");
    assert!(order.code.as_str().starts_with("ORD-"));
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].id, 1);
    assert_eq!(order.items[0].product_name, "Mug");
    assert_eq!(order.items[0].total_price, Decimal::new(2500, 2));
    assert_eq!(order.total_amount, Decimal::new(3700, 2));

    assert_eq!(store.products.check_stock(mug).await.unwrap(), 3);
    assert_eq!(store.products.check_stock(tea).await.unwrap(), 7);
    assert!(store.carts.cart(bob).await.unwrap().items.is_empty());

    // Later catalog edits leave the order untouched.
    store
        .products
        .update_product(
            mug,
            ProductUpdate {
                price: Some(Decimal::new(9900, 2)),
                name: Some("Big Mug".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let reread = store.orders.my_order(bob, order.id).await.unwrap();
    assert_eq!(reread, order);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn insufficient_stock_changes_nothing() {
    let store = Storefront::start(&StorefrontConfig::default()).await.unwrap();
    let bob = customer(&store, "bob").await;
    let mug = product(&store, "Mug", 1250, 5).await;
    let tea = product(&store, "Tea", 400, 4).await;

    store
        .carts
        .add_to_cart(
            bob,
            AddToCart {
                product_id: mug,
                quantity: 2,
            },
        )
        .await
        .unwrap();
    store
        .carts
        .add_to_cart(
            bob,
            AddToCart {
                product_id: tea,
                quantity: 4,
            },
        )
        .await
        .unwrap();
    // Someone else bought tea after it was carted.
    store.products.reserve_stock(tea, 2).await.unwrap();

    let err = store.orders.checkout(bob, shipping()).await.unwrap_err();
    assert_eq!(
        err,
        OrderError::InsufficientStock {
            name: "Tea".to_string(),
            available: 2
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);

    assert_eq!(store.products.check_stock(mug).await.unwrap(), 5);
    assert_eq!(store.products.check_stock(tea).await.unwrap(), 2);
    assert_eq!(store.carts.list_selected(bob).await.unwrap().len(), 2);
    assert!(store.orders.orders().await.unwrap().is_empty());

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn inactive_product_blocks_checkout_and_is_pruned_on_read() {
    let store = Storefront::start(&StorefrontConfig::default()).await.unwrap();
    let bob = customer(&store, "bob").await;
    let mug = product(&store, "Mug", 1250, 5).await;

    store
        .carts
        .add_to_cart(
            bob,
            AddToCart {
                product_id: mug,
                quantity: 1,
            },
        )
        .await
        .unwrap();
    store.products.deactivate_product(mug).await.unwrap();

    let err = store.orders.checkout(bob, shipping()).await.unwrap_err();
    assert_eq!(err, OrderError::ProductInactive("Mug".to_string()));
    assert_eq!(store.products.check_stock(mug).await.unwrap(), 5);

    let view = store.carts.cart(bob).await.unwrap();
    assert!(view.items.is_empty());
    assert!(store.carts.list_selected(bob).await.unwrap().is_empty());

    // Off-sale products disappear from the catalog but remain stored.
    assert!(store.products.list_products(None).await.unwrap().is_empty());
    assert!(matches!(
        store.products.product(mug).await,
        Err(ProductError::NotFound(_))
    ));
    assert!(store.products.get(mug).await.unwrap().is_some());

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn nothing_selected_is_rejected() {
    let store = Storefront::start(&StorefrontConfig::default()).await.unwrap();
    let bob = customer(&store, "bob").await;
    let mug = product(&store, "Mug", 1250, 5).await;

    let err = store.orders.checkout(bob, shipping()).await.unwrap_err();
    assert_eq!(err, OrderError::EmptySelection);

    let line = store
        .carts
        .add_to_cart(
            bob,
            AddToCart {
                product_id: mug,
                quantity: 1,
            },
        )
        .await
        .unwrap();
    store
        .carts
        .update_cart_item(
            bob,
            line.id,
            CartLineUpdate {
                selected: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let err = store.orders.checkout(bob, shipping()).await.unwrap_err();
    assert_eq!(err, OrderError::EmptySelection);
    assert_eq!(store.carts.cart(bob).await.unwrap().items.len(), 1);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn only_selected_lines_are_bought() {
    let store = Storefront::start(&StorefrontConfig::default()).await.unwrap();
    let bob = customer(&store, "bob").await;
    let mug = product(&store, "Mug", 1000, 5).await;
    let tea = product(&store, "Tea", 400, 5).await;

    store
        .carts
        .add_to_cart(
            bob,
            AddToCart {
                product_id: mug,
                quantity: 1,
            },
        )
        .await
        .unwrap();
    let later = store
        .carts
        .add_to_cart(
            bob,
            AddToCart {
                product_id: tea,
                quantity: 2,
            },
        )
        .await
        .unwrap();
    store
        .carts
        .update_cart_item(
            bob,
            later.id,
            CartLineUpdate {
                selected: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let order = store.orders.checkout(bob, shipping()).await.unwrap();
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.total_amount, Decimal::new(1000, 2));
    assert_eq!(store.products.check_stock(tea).await.unwrap(), 5);

    let left = store.carts.cart(bob).await.unwrap();
    assert_eq!(left.items.len(), 1);
    assert_eq!(left.items[0].line.id, later.id);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn disabled_or_unknown_buyers_cannot_check_out() {
    let store = Storefront::start(&StorefrontConfig::default()).await.unwrap();
    let bob = customer(&store, "bob").await;
    let mug = product(&store, "Mug", 1250, 5).await;
    store
        .carts
        .add_to_cart(
            bob,
            AddToCart {
                product_id: mug,
                quantity: 1,
            },
        )
        .await
        .unwrap();

    store
        .users
        .update_user(
            bob,
            UserUpdate {
                enabled: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let err = store.orders.checkout(bob, shipping()).await.unwrap_err();
    assert_eq!(err, OrderError::UserDisabled(bob));
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let err = store
        .orders
        .checkout(UserId(999), shipping())
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::UserNotFound(UserId(999)));
    assert_eq!(store.products.check_stock(mug).await.unwrap(), 5);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn bad_shipping_is_rejected_before_anything_moves() {
    let store = Storefront::start(&StorefrontConfig::default()).await.unwrap();
    let bob = customer(&store, "bob").await;
    let mug = product(&store, "Mug", 1250, 5).await;
    store
        .carts
        .add_to_cart(
            bob,
            AddToCart {
                product_id: mug,
                quantity: 1,
            },
        )
        .await
        .unwrap();

    let mut details = shipping();
    details.phone = "12-34".to_string();
    let err = store.orders.checkout(bob, details).await.unwrap_err();
    assert!(matches!(err, OrderError::InvalidShipping(_)));
    assert_eq!(store.products.check_stock(mug).await.unwrap(), 5);
    assert_eq!(store.carts.list_selected(bob).await.unwrap().len(), 1);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn code_collision_is_a_conflict_without_side_effects() {
    let store = Storefront::start(&StorefrontConfig::default()).await.unwrap();
    let bob = customer(&store, "bob").await;
    let ann = customer(&store, "ann").await;
    let mug = product(&store, "Mug", 1250, 5).await;
    for user in [bob, ann] {
        store
            .carts
            .add_to_cart(
                user,
                AddToCart {
                    product_id: mug,
                    quantity: 1,
                },
            )
            .await
            .unwrap();
    }

    let instant = chrono::Utc::now();
    let first = store.orders.checkout_at(bob, shipping(), instant).await.unwrap();
    let err = store
        .orders
        .checkout_at(ann, shipping(), instant)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Conflict(ref key) if key.contains(first.code.as_str())));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(store.products.check_stock(mug).await.unwrap(), 4);
    assert_eq!(store.carts.list_selected(ann).await.unwrap().len(), 1);
    assert_eq!(store.orders.orders().await.unwrap().len(), 1);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn orders_are_private_and_status_is_free_form() {
    let store = Storefront::start(&StorefrontConfig::default()).await.unwrap();
    let bob = customer(&store, "bob").await;
    let ann = customer(&store, "ann").await;
    let mug = product(&store, "Mug", 1250, 5).await;
    store
        .carts
        .add_to_cart(
            bob,
            AddToCart {
                product_id: mug,
                quantity: 1,
            },
        )
        .await
        .unwrap();
    let order = store.orders.checkout(bob, shipping()).await.unwrap();

    let err = store.orders.my_order(ann, order.id).await.unwrap_err();
    assert_eq!(err, OrderError::Forbidden(order.id));
    assert!(store.orders.my_orders(ann).await.unwrap().is_empty());
    assert_eq!(store.orders.my_orders(bob).await.unwrap().len(), 1);

    let paid = store
        .orders
        .update_status(order.id, OrderStatus::Paid)
        .await
        .unwrap();
    assert_eq!(paid.status, OrderStatus::Paid);
    assert_eq!(paid.items, order.items);
    assert!(paid.updated_at >= order.updated_at);

    let back = store
        .orders
        .update_status(order.id, OrderStatus::Pending)
        .await
        .unwrap();
    assert_eq!(back.status, OrderStatus::Pending);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn root_admin_is_reconciled_and_protected() {
    let config = StorefrontConfig::default();
    let store = Storefront::start(&config).await.unwrap();

    let root = store.users.user(store.root_admin).await.unwrap();
    assert_eq!(root.role, Role::Admin);
    assert!(root.is_system);
    assert_eq!(root.email, config.root_admin.root_admin_email);

    let again = store
        .users
        .ensure_root_admin(&config.root_admin.root_admin())
        .await
        .unwrap();
    assert_eq!(again, store.root_admin);
    assert_eq!(store.users.users().await.unwrap().len(), 1);

    let err = store.users.remove_user(store.root_admin).await.unwrap_err();
    assert_eq!(err, UserError::SystemAccount(store.root_admin));
    let err = store
        .users
        .update_user(
            store.root_admin,
            UserUpdate {
                role: Some(Role::Customer),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn existing_account_is_promoted_to_root_admin() {
    let store = Storefront::start(&StorefrontConfig::default()).await.unwrap();
    let ops = store
        .users
        .register(UserCreate {
            name: "ops".to_string(),
            email: "ops@shop.test".to_string(),
            role: None,
        })
        .await
        .unwrap();

    let promoted = store
        .users
        .ensure_root_admin(&RootAdmin {
            name: "Ops".to_string(),
            email: "OPS@shop.test".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(promoted, ops);

    let user = store.users.user(ops).await.unwrap();
    assert_eq!(user.role, Role::Admin);
    assert!(user.is_system);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn removing_a_user_clears_their_cart() {
    let store = Storefront::start(&StorefrontConfig::default()).await.unwrap();
    let bob = customer(&store, "bob").await;
    let ann = customer(&store, "ann").await;
    let mug = product(&store, "Mug", 1250, 5).await;
    for user in [bob, ann] {
        store
            .carts
            .add_to_cart(
                user,
                AddToCart {
                    product_id: mug,
                    quantity: 1,
                },
            )
            .await
            .unwrap();
    }

    store.users.remove_user(bob).await.unwrap();

    assert!(matches!(
        store.users.user(bob).await,
        Err(UserError::NotFound(_))
    ));
    assert!(store.carts.cart(bob).await.unwrap().items.is_empty());
    assert_eq!(store.carts.cart(ann).await.unwrap().items.len(), 1);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let store = Storefront::start(&StorefrontConfig::default()).await.unwrap();
    customer(&store, "bob").await;

    let err = store
        .users
        .register(UserCreate {
            name: "robert".to_string(),
            email: "BOB@example.com".to_string(),
            role: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::AlreadyExists(_)));
    assert_eq!(err.kind(), ErrorKind::Conflict);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn products_are_never_hard_deleted() {
    let store = Storefront::start(&StorefrontConfig::default()).await.unwrap();
    let mug = product(&store, "Mug", 1250, 5).await;

    let err = store.products.delete(mug).await.unwrap_err();
    assert!(matches!(err, ProductError::DeleteRefused(_)));
    assert!(store.products.get(mug).await.unwrap().is_some());

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn cart_rejects_foreign_lines_and_overdrawn_quantities() {
    let store = Storefront::start(&StorefrontConfig::default()).await.unwrap();
    let bob = customer(&store, "bob").await;
    let ann = customer(&store, "ann").await;
    let mug = product(&store, "Mug", 1250, 3).await;
    let empty = product(&store, "Ghost", 100, 0).await;

    let line = store
        .carts
        .add_to_cart(
            bob,
            AddToCart {
                product_id: mug,
                quantity: 2,
            },
        )
        .await
        .unwrap();

    let err = store
        .carts
        .add_to_cart(
            bob,
            AddToCart {
                product_id: mug,
                quantity: 2,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        CartError::ExceedsStock {
            name: "Mug".to_string(),
            available: 3
        }
    );
    let err = store
        .carts
        .add_to_cart(
            bob,
            AddToCart {
                product_id: empty,
                quantity: 1,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, CartError::OutOfStock("Ghost".to_string()));

    let err = store.carts.remove_cart_item(ann, line.id).await.unwrap_err();
    assert_eq!(err, CartError::Forbidden(line.id));
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    store.carts.remove_cart_item(bob, line.id).await.unwrap();
    assert!(store.carts.cart(bob).await.unwrap().items.is_empty());

    store.shutdown().await.unwrap();
}
