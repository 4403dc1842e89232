// Endpoint handlers
// One function per served path; each is a pure read of the catalog or the demo table

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::router::RequestContext;
use crate::catalog::Catalog;
use crate::http;
use crate::logger;
use crate::query::{self, CustomerFilter, ProductFilter, QueryError, QueryParams};
use crate::table::{self, Record, Table};

/// Response body for `/dataframe`
#[derive(Serialize)]
struct TableBody<'a> {
    dataframe: Vec<Record<'a>>,
    columns: &'a [String],
    shape: (usize, usize),
}

fn json_ok<T: Serialize>(ctx: &RequestContext<'_>, body: &T) -> Response<Full<Bytes>> {
    http::build_json_response(StatusCode::OK, body, ctx.pretty_json, ctx.is_head)
}

fn bad_request(ctx: &RequestContext<'_>, err: &QueryError) -> Response<Full<Bytes>> {
    logger::log_warning(&format!("Rejected query '{}': {err}", ctx.query.unwrap_or("")));
    http::build_400_response(&err.to_string(), err.param(), ctx.is_head)
}

pub fn list_all(ctx: &RequestContext<'_>, catalog: &Catalog) -> Response<Full<Bytes>> {
    json_ok(ctx, &query::list_all(catalog))
}

pub fn search_customers(ctx: &RequestContext<'_>, catalog: &Catalog) -> Response<Full<Bytes>> {
    let filter = QueryParams::parse(ctx.query)
        .and_then(|params| CustomerFilter::from_params(&params, ctx.zero_is_unset));
    match filter {
        Ok(filter) => json_ok(ctx, &query::filter_customers(catalog, &filter)),
        Err(e) => bad_request(ctx, &e),
    }
}

pub fn search_products(ctx: &RequestContext<'_>, catalog: &Catalog) -> Response<Full<Bytes>> {
    let filter = QueryParams::parse(ctx.query)
        .and_then(|params| ProductFilter::from_params(&params, ctx.zero_is_unset));
    match filter {
        Ok(filter) => json_ok(ctx, &query::filter_products(catalog, &filter)),
        Err(e) => bad_request(ctx, &e),
    }
}

pub fn table_json(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    let table = Table::demo();
    let body = TableBody {
        dataframe: table.records(),
        columns: table.columns(),
        shape: table.shape(),
    };
    json_ok(ctx, &body)
}

pub fn table_html(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    let rendered = Table::demo().to_html("table table-striped", "dataframe");
    http::build_html_response(table::html_document("DataFrame", &rendered), ctx.is_head)
}
