//! # Storefront demo
//!
//! Starts the full storefront and walks one customer through a purchase:
//! 1.  Register a customer and stock two products.
//! 2.  Fill the cart and read it back.
//! 3.  Check out, then mark the order paid.
//!
//! ```bash
//! cargo run -- --log-level debug
//! LOG_FORMAT=json cargo run
//! ```

use rust_decimal::Decimal;
use storefront::config::StorefrontConfig;
use storefront::lifecycle::{setup_tracing, Storefront};
use storefront::model::{AddToCart, OrderStatus, ProductCreate, ShippingInfo, UserCreate};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = StorefrontConfig::load().map_err(|e| e.to_string())?;
    setup_tracing(&config.logging);

    info!("Starting storefront");
    let storefront = Storefront::start(&config)
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("catalog_setup");
    let (mug, tea) = async {
        let mug = storefront
            .products
            .create_product(ProductCreate {
                name: "Enamel Mug".to_string(),
                description: "Camp mug, 350ml".to_string(),
                price: Decimal::new(1299, 2),
                stock: Some(10),
                image_url: None,
            })
            .await?;
        let tea = storefront
            .products
            .create_product(ProductCreate {
                name: "Sencha".to_string(),
                description: "Loose leaf, 100g".to_string(),
                price: Decimal::new(850, 2),
                stock: Some(3),
                image_url: None,
            })
            .await?;
        Ok::<_, storefront::product_actor::ProductError>((mug, tea))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;
    info!(%mug, %tea, "Catalog stocked");

    let customer = storefront
        .users
        .register(UserCreate {
            name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role: None,
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(user_id = %customer, "Customer registered");

    let span = tracing::info_span!("shopping", user_id = %customer);
    async {
        for (product_id, quantity) in [(mug, 2), (tea, 1)] {
            storefront
                .carts
                .add_to_cart(
                    customer,
                    AddToCart {
                        product_id,
                        quantity,
                    },
                )
                .await
                .map_err(|e| e.to_string())?;
        }
        let cart = storefront
            .carts
            .cart(customer)
            .await
            .map_err(|e| e.to_string())?;
        info!(
            items = cart.total_items,
            total = %cart.selected_total_price,
            "Cart ready"
        );
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("checkout", user_id = %customer);
    let checkout = async {
        let order = storefront
            .orders
            .checkout(
                customer,
                ShippingInfo {
                    name: "Alice Example".to_string(),
                    phone: "+15550100200".to_string(),
                    address: "1 Main Street, Springfield".to_string(),
                },
            )
            .await?;
        storefront
            .orders
            .update_status(order.id, OrderStatus::Paid)
            .await
    }
    .instrument(span)
    .await;

    match checkout {
        Ok(order) => info!(
            order_code = %order.code,
            status = %order.status,
            total = %order.total_amount,
            "Order placed"
        ),
        Err(e) => error!(error = %e, "Checkout failed"),
    }

    let left = storefront
        .products
        .check_stock(mug)
        .await
        .map_err(|e| e.to_string())?;
    info!(product_id = %mug, left, "Stock after checkout");

    storefront.shutdown().await.map_err(|e| e.to_string())?;
    info!("Storefront demo completed");
    Ok(())
}
