use sqlx::postgres::PgQueryResult;
use tracing::info;

use crate::db::DbPool;
use crate::error::Result;

#[derive(Debug)]
struct ProductSeed {
    id: i32,
    name: &'static str,
    price: f64,
}

#[derive(Debug)]
struct OrderSeed {
    id: i32,
    order_date: &'static str,
}

#[derive(Debug)]
struct OrderDetailSeed {
    order_id: i32,
    product_id: i32,
    quantity: i32,
}

static PRODUCT_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: 1,
        name: "Espresso Beans 1kg",
        price: 12.50,
    },
    ProductSeed {
        id: 2,
        name: "Cold Brew Bottle",
        price: 4.00,
    },
    ProductSeed {
        id: 3,
        name: "Ceramic Mug",
        price: 18.00,
    },
];

// Five distinct order dates; per-day revenue works out to
// 37.00 / 42.00 / 50.00 / 48.50 / 40.00 (total 217.50, mean 43.50).
static ORDER_SEEDS: &[OrderSeed] = &[
    OrderSeed {
        id: 1001,
        order_date: "2024-03-04",
    },
    OrderSeed {
        id: 1002,
        order_date: "2024-03-05",
    },
    OrderSeed {
        id: 1003,
        order_date: "2024-03-05",
    },
    OrderSeed {
        id: 1004,
        order_date: "2024-03-06",
    },
    OrderSeed {
        id: 1005,
        order_date: "2024-03-07",
    },
    OrderSeed {
        id: 1006,
        order_date: "2024-03-08",
    },
];

static ORDER_DETAIL_SEEDS: &[OrderDetailSeed] = &[
    OrderDetailSeed {
        order_id: 1001,
        product_id: 1,
        quantity: 2,
    },
    OrderDetailSeed {
        order_id: 1001,
        product_id: 2,
        quantity: 3,
    },
    OrderDetailSeed {
        order_id: 1002,
        product_id: 3,
        quantity: 1,
    },
    OrderDetailSeed {
        order_id: 1003,
        product_id: 2,
        quantity: 6,
    },
    OrderDetailSeed {
        order_id: 1004,
        product_id: 1,
        quantity: 4,
    },
    OrderDetailSeed {
        order_id: 1005,
        product_id: 1,
        quantity: 1,
    },
    OrderDetailSeed {
        order_id: 1005,
        product_id: 3,
        quantity: 2,
    },
    OrderDetailSeed {
        order_id: 1006,
        product_id: 2,
        quantity: 10,
    },
];

/// Load the deterministic retail fixture used by development environments
/// and the end-to-end test. Idempotent: re-running updates in place.
pub async fn run(pool: &DbPool) -> Result<()> {
    seed_products(pool).await?;
    seed_orders(pool).await?;
    seed_order_details(pool).await?;
    Ok(())
}

async fn seed_products(pool: &DbPool) -> Result<()> {
    for seed in PRODUCT_SEEDS {
        let result: PgQueryResult = sqlx::query(
            r#"
            INSERT INTO products (productid, productname, price)
            VALUES ($1, $2, $3)
            ON CONFLICT (productid)
            DO UPDATE SET productname = EXCLUDED.productname, price = EXCLUDED.price
            "#,
        )
        .bind(seed.id)
        .bind(seed.name)
        .bind(seed.price)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            info!(product = seed.name, "Seeded product");
        }
    }
    Ok(())
}

async fn seed_orders(pool: &DbPool) -> Result<()> {
    for seed in ORDER_SEEDS {
        let result: PgQueryResult = sqlx::query(
            r#"
            INSERT INTO orders (orderid, orderdate)
            VALUES ($1, $2::date)
            ON CONFLICT (orderid)
            DO UPDATE SET orderdate = EXCLUDED.orderdate
            "#,
        )
        .bind(seed.id)
        .bind(seed.order_date)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            info!(order = seed.id, date = seed.order_date, "Seeded order");
        }
    }
    Ok(())
}

async fn seed_order_details(pool: &DbPool) -> Result<()> {
    for seed in ORDER_DETAIL_SEEDS {
        let result: PgQueryResult = sqlx::query(
            r#"
            INSERT INTO order_details (orderid, productid, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (orderid, productid)
            DO UPDATE SET quantity = EXCLUDED.quantity
            "#,
        )
        .bind(seed.order_id)
        .bind(seed.product_id)
        .bind(seed.quantity)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            info!(
                order = seed.order_id,
                product = seed.product_id,
                "Seeded order line"
            );
        }
    }
    Ok(())
}
