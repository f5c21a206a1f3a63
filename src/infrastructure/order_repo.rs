use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderItem, OrderListPage, OrderRecord};
use crate::domain::ports::OrderRepository;
use crate::schema::{order_items, orders};

use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};

#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    /// The single write phase of order creation: the order row and its item
    /// rows commit atomically or not at all.
    fn insert(&self, order: NewOrder) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let order_id = Uuid::now_v7();
            diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: order_id,
                    user_id: order.user_id,
                    total: order.total,
                })
                .execute(conn)?;

            let item_rows: Vec<NewOrderItemRow> = order
                .items
                .into_iter()
                .enumerate()
                .map(|(i, item)| NewOrderItemRow {
                    id: Uuid::now_v7(),
                    order_id,
                    product_id: item.product_id,
                    qty: item.qty,
                    price: item.price,
                    position: i as i32,
                })
                .collect();
            diesel::insert_into(order_items::table)
                .values(&item_rows)
                .execute(conn)?;

            Ok(order_id)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderRecord>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = OrderItemRow::belonging_to(&order)
            .select(OrderItemRow::as_select())
            .order(order_items::position.asc())
            .load(&mut conn)?;

        Ok(Some(record_from_rows(order, items)))
    }

    fn list_by_user(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<OrderListPage, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total_count: i64 = orders::table
                .filter(orders::user_id.eq(user_id))
                .count()
                .get_result(conn)?;

            let rows = orders::table
                .filter(orders::user_id.eq(user_id))
                .select(OrderRow::as_select())
                .order(orders::id.asc())
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            // One query for all items on the page, grouped back per order.
            let items = OrderItemRow::belonging_to(&rows)
                .select(OrderItemRow::as_select())
                .order(order_items::position.asc())
                .load(conn)?
                .grouped_by(&rows);

            Ok(OrderListPage {
                orders: rows
                    .into_iter()
                    .zip(items)
                    .map(|(order, items)| record_from_rows(order, items))
                    .collect(),
                total_count,
            })
        })
    }
}

fn record_from_rows(order: OrderRow, items: Vec<OrderItemRow>) -> OrderRecord {
    OrderRecord {
        id: order.id,
        user_id: order.user_id,
        total: order.total,
        created_at: order.created_at,
        items: items
            .into_iter()
            .map(|row| OrderItem {
                product_id: row.product_id,
                qty: row.qty,
                price: row.price,
            })
            .collect(),
    }
}
