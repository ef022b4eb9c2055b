use crate::handlers::{
    assign_route::__path_assign_route, available_routes::__path_available_routes,
    cancel_delivery::__path_cancel_delivery, complete_route::__path_complete_route,
    confirm_delivery::__path_confirm_delivery, create_delivery::__path_create_delivery,
    current_user::__path_current_user, devices::__path_link_device,
    devices::__path_unlink_device, get_delivery::__path_get_delivery,
    health::__path_health_check, login::__path_login, my_deliveries::__path_my_deliveries,
    password_reset::__path_forgot_password, password_reset::__path_reset_password,
    routes::__path_create_route, routes::__path_list_routes, signup::__path_signup,
    user_routes::__path_user_routes, verify_email::__path_resend_verification,
    verify_email::__path_verify_email, warehouse_packages::__path_warehouse_packages,
};
use entrega_primitives::models::dtos::auth_dto::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, ResendVerificationRequest,
    ResetPasswordRequest, SignupRequest, UserDto, VerifyEmailRequest,
};
use entrega_primitives::models::dtos::delivery_dto::{
    CreateDeliveryRequest, DeliveryDto, ProductDto, WarehousePackageDto,
};
use entrega_primitives::models::dtos::device_dto::LinkDeviceRequest;
use entrega_primitives::models::dtos::route_dto::{
    AvailableRouteDto, CreateRouteRequest, RouteDto,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        signup, login, verify_email, resend_verification, forgot_password, reset_password,
        create_delivery, confirm_delivery, cancel_delivery, get_delivery, warehouse_packages,
        my_deliveries, list_routes, create_route, assign_route, complete_route,
        available_routes, user_routes, link_device, unlink_device, current_user, health_check
    ),
    components(schemas(
        SignupRequest, LoginRequest, LoginResponse, VerifyEmailRequest,
        ResendVerificationRequest, ForgotPasswordRequest, ResetPasswordRequest, UserDto,
        CreateDeliveryRequest, DeliveryDto, ProductDto, WarehousePackageDto,
        CreateRouteRequest, RouteDto, AvailableRouteDto, LinkDeviceRequest
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Signup, login and credential confirmation"),
        (name = "Delivery", description = "Parcel lifecycle"),
        (name = "Routes", description = "Courier trips"),
        (name = "Devices", description = "Push endpoints"),
        (name = "Users", description = "Account profile")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
