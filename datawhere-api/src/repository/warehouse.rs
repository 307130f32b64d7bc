//! Star-schema access: dimension inserts, natural-key lookups, fact inserts
//! and the fact-to-dimensions join.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::Error;

use crate::models::{
    DimCustomer, DimDate, DimProduct, DimRegion, FactSale, NewDimCustomer, NewDimProduct,
    NewDimRegion, NewFactSale, SaleDetail,
};
use crate::schema::{dim_customer, dim_date, dim_product, dim_region, fact_sales};

pub fn insert_date(conn: &mut PgConnection, date: &DimDate) -> Result<DimDate, Error> {
    diesel::insert_into(dim_date::table)
        .values(date)
        .returning(DimDate::as_returning())
        .get_result(conn)
}

pub fn insert_product(conn: &mut PgConnection, product: &NewDimProduct) -> Result<DimProduct, Error> {
    diesel::insert_into(dim_product::table)
        .values(product)
        .returning(DimProduct::as_returning())
        .get_result(conn)
}

pub fn insert_region(conn: &mut PgConnection, region: &NewDimRegion) -> Result<DimRegion, Error> {
    diesel::insert_into(dim_region::table)
        .values(region)
        .returning(DimRegion::as_returning())
        .get_result(conn)
}

pub fn insert_customer(
    conn: &mut PgConnection,
    customer: &NewDimCustomer,
) -> Result<DimCustomer, Error> {
    diesel::insert_into(dim_customer::table)
        .values(customer)
        .returning(DimCustomer::as_returning())
        .get_result(conn)
}

/// Resolves a business `product_id` to its dimension row.
pub fn find_product_by_natural_key(
    conn: &mut PgConnection,
    product_id: &str,
) -> Result<Option<DimProduct>, Error> {
    dim_product::table
        .filter(dim_product::product_id.eq(product_id))
        .select(DimProduct::as_select())
        .first(conn)
        .optional()
}

/// Fails with a foreign-key violation if any dimension key is unknown.
pub fn insert_fact_sale(conn: &mut PgConnection, sale: &NewFactSale) -> Result<FactSale, Error> {
    diesel::insert_into(fact_sales::table)
        .values(sale)
        .returning(FactSale::as_returning())
        .get_result(conn)
}

pub fn count_fact_sales(conn: &mut PgConnection) -> Result<i64, Error> {
    fact_sales::table.count().get_result(conn)
}

/// Facts joined with every dimension, ordered by calendar date then fact id.
pub fn sales_with_dimensions(
    conn: &mut PgConnection,
    offset: i64,
    limit: i64,
) -> Result<Vec<SaleDetail>, Error> {
    let rows = fact_sales::table
        .inner_join(dim_date::table)
        .inner_join(dim_product::table)
        .inner_join(dim_region::table)
        .inner_join(dim_customer::table)
        .order((dim_date::full_date.asc(), fact_sales::id.asc()))
        .offset(offset)
        .limit(limit)
        .select((
            FactSale::as_select(),
            DimDate::as_select(),
            DimProduct::as_select(),
            DimRegion::as_select(),
            DimCustomer::as_select(),
        ))
        .load::<(FactSale, DimDate, DimProduct, DimRegion, DimCustomer)>(conn)?;

    Ok(rows.into_iter().map(SaleDetail::from).collect())
}
