//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, health, items, requests, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShareIt API",
        version = "1.0.0",
        description = "Peer-to-peer item sharing REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Items
        items::list_items,
        items::get_item,
        items::create_item,
        items::update_item,
        items::delete_item,
        items::search_items,
        items::add_comment,
        // Bookings
        bookings::create_booking,
        bookings::confirm_booking,
        bookings::get_booking,
        bookings::list_bookings,
        bookings::list_owner_bookings,
        // Requests
        requests::create_request,
        requests::list_my_requests,
        requests::list_other_requests,
        requests::get_request,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::UserRef,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Items
            crate::models::item::Item,
            crate::models::item::ItemView,
            crate::models::item::ItemRef,
            crate::models::item::ItemDetails,
            crate::models::item::CreateItem,
            crate::models::item::UpdateItem,
            // Bookings
            crate::models::booking::BookingStatus,
            crate::models::booking::BookingView,
            crate::models::booking::BookingRef,
            crate::models::booking::CreateBooking,
            // Comments
            crate::models::comment::CommentView,
            crate::models::comment::CreateComment,
            // Requests
            crate::models::request::RequestView,
            crate::models::request::CreateRequest,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User directory"),
        (name = "items", description = "Item catalog and comments"),
        (name = "bookings", description = "Booking engine"),
        (name = "requests", description = "Request board")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
