use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, ResponseError,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::auth_service::{AccessClaims, AuthService};
use crate::utils::{AppError, ErrorBody};

/// Authenticated caller, available to handlers as `web::ReqData<Identity>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<AccessClaims> for Identity {
    fn from(claims: AccessClaims) -> Self {
        Identity {
            id: claims.id,
            email: claims.email,
            is_admin: claims.is_admin,
        }
    }
}

/// Bearer-token gate. `admin()` additionally rejects non-admin callers.
#[derive(Clone, Copy)]
pub struct AuthMiddleware {
    admin_only: bool,
}

impl AuthMiddleware {
    pub fn bearer() -> Self {
        Self { admin_only: false }
    }

    pub fn admin() -> Self {
        Self { admin_only: true }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            admin_only: self.admin_only,
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    admin_only: bool,
}

fn authenticate(req: &ServiceRequest, admin_only: bool) -> Result<Identity, AppError> {
    let auth = req
        .app_data::<web::Data<AuthService>>()
        .ok_or_else(|| AppError::internal("AuthService is not registered as app data"))?;

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized(ErrorBody::MissingToken))?;

    let identity = auth
        .verify_token(token)
        .map(Identity::from)
        .map_err(|e| AppError::Unauthorized(ErrorBody::Auth(e)))?;

    if admin_only && !identity.is_admin {
        return Err(AppError::Forbidden(ErrorBody::Auth("Action Forbidden".to_string())));
    }

    Ok(identity)
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req, self.admin_only) {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(e) => {
                log::warn!("🔒 {} {} rejected: {}", req.method(), req.path(), e);
                let response = req.into_response(e.error_response()).map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::services::auth_service::test_auth_service;
    use actix_web::{http::StatusCode, test, App, HttpResponse};
    use mongodb::bson::oid::ObjectId;

    async fn whoami(identity: web::ReqData<Identity>) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({
            "id": identity.id,
            "isAdmin": identity.is_admin
        }))
    }

    fn token_for(is_admin: bool) -> String {
        let user = User {
            id: Some(ObjectId::new()),
            first_name: "A".into(),
            last_name: "B".into(),
            email: "a@b.c".into(),
            mobile_no: String::new(),
            password: String::new(),
            is_admin,
        };
        test_auth_service().create_access_token(&user).unwrap()
    }

    macro_rules! gate_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_auth_service()))
                    .service(
                        web::resource("/me")
                            .wrap(AuthMiddleware::bearer())
                            .route(web::get().to(whoami)),
                    )
                    .service(
                        web::resource("/admin")
                            .wrap(AuthMiddleware::admin())
                            .route(web::get().to(whoami)),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn missing_token_is_unauthorized() {
        let app = gate_app!();
        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({ "auth": "Failed. No Token" }));
    }

    #[actix_web::test]
    async fn garbage_token_is_unauthorized() {
        let app = gate_app!();
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["auth"], "Failed");
    }

    #[actix_web::test]
    async fn valid_token_attaches_identity() {
        let app = gate_app!();
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", token_for(false))))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["isAdmin"], false);
    }

    #[actix_web::test]
    async fn admin_gate_rejects_regular_users() {
        let app = gate_app!();
        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token_for(false))))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({ "auth": "Failed", "message": "Action Forbidden" }));

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token_for(true))))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
