pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod pagination;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::{OrderService, ProductService};
use infrastructure::{DieselOrderRepository, DieselProductRepository};

pub use db::{create_pool, DbPool};

pub type CatalogService = ProductService<DieselProductRepository>;
pub type OrderingService = OrderService<DieselProductRepository, DieselOrderRepository>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::root,
        handlers::health::health,
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::list_orders_by_user,
    ),
    components(schemas(
        handlers::products::SizeRequest,
        handlers::products::CreateProductRequest,
        handlers::products::CreatedResponse,
        handlers::products::ProductResponse,
        handlers::products::ListProductsResponse,
        handlers::orders::OrderItemRequest,
        handlers::orders::CreateOrderRequest,
        handlers::orders::CreatedOrderResponse,
        handlers::orders::ProductDetailsResponse,
        handlers::orders::OrderItemResponse,
        handlers::orders::OrderResponse,
        handlers::orders::ListOrdersResponse,
        pagination::PageMeta,
    )),
    tags(
        (name = "meta", description = "Service information and health"),
        (name = "products", description = "Product catalog"),
        (name = "orders", description = "Order creation and listing"),
    )
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server. The pool is the only shared state; each worker gets
/// its own service instances holding a pool handle.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        let products = web::Data::new(ProductService::new(DieselProductRepository::new(
            pool.clone(),
        )));
        let orders = web::Data::new(OrderService::new(
            DieselProductRepository::new(pool.clone()),
            DieselOrderRepository::new(pool.clone()),
        ));
        App::new()
            .app_data(products)
            .app_data(orders)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .route("/", web::get().to(handlers::health::root))
            .route("/health", web::get().to(handlers::health::health))
            .service(
                web::scope("/products")
                    .route("/", web::post().to(handlers::products::create_product))
                    .route("/", web::get().to(handlers::products::list_products))
                    .route("/{id}", web::get().to(handlers::products::get_product)),
            )
            .service(
                web::scope("/orders")
                    .route("/", web::post().to(handlers::orders::create_order))
                    // Registered before the user listing so the literal
                    // "order" segment is never taken as a userId.
                    .route("/order/{id}", web::get().to(handlers::orders::get_order))
                    .route(
                        "/{user_id}",
                        web::get().to(handlers::orders::list_orders_by_user),
                    ),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
