//! Authenticated client for the skincare REST API.
//!
//! Every request carries the stored access token. A 401 is handed to the
//! [`TokenAuthenticator`] and the request is replayed once with the token it
//! returns.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{RequestBuilder, Response, StatusCode};
use skincare_core::auth::{AuthRemoteTrait, TokenStore};
use skincare_core::devices::{DeviceRegistration, DeviceRemoteTrait};
use skincare_core::notifications::{
    NotificationRule, NotificationRuleCreate, NotificationRuleRemoteTrait, NotificationRuleUpdate,
};
use skincare_core::products::{Product, ProductCreate, ProductRemoteTrait, ProductUpdate};
use skincare_core::routines::{
    Routine, RoutineCreate, RoutineFilter, RoutineRemoteTrait, RoutineUpdate,
};
use skincare_core::users::{User, UserRegistration, UserRemoteTrait, UserUpdate};
use skincare_core::Page;
use std::sync::Arc;
use urlencoding::encode;

use crate::authenticator::TokenAuthenticator;
use crate::config::ClientConfig;
use crate::error::{ApiClientError, Result};
use crate::mapping::{
    page_from, rule_create_request, rule_from_response, rule_update_request, ZoneContext,
};
use crate::response::{expect_success, parse_response};
use crate::types::*;

type CoreResult<T> = skincare_core::Result<T>;

/// Client for every endpoint that needs a session.
pub struct SkincareApiClient {
    client: reqwest::Client,
    config: ClientConfig,
    tokens: Arc<dyn TokenStore>,
    authenticator: TokenAuthenticator,
}

impl SkincareApiClient {
    /// `auth` is used for token refresh only.
    pub fn new(
        config: ClientConfig,
        tokens: Arc<dyn TokenStore>,
        auth: Arc<dyn AuthRemoteTrait>,
    ) -> Result<Self> {
        Ok(Self {
            client: config.http_client()?,
            authenticator: TokenAuthenticator::new(tokens.clone(), auth),
            config,
            tokens,
        })
    }

    fn headers(token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiClientError::auth("Invalid access token format"))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    /// Sends the request, replaying it once after a recoverable 401.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let token = self.tokens.access_token();
        let retry = request.try_clone();

        let response = request
            .headers(Self::headers(token.as_deref())?)
            .send()
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let Some(retry) = retry else {
            return Ok(response);
        };
        match self.authenticator.authenticate(token.as_deref()).await {
            Some(fresh) => {
                debug!("Replaying request after 401");
                Ok(retry.headers(Self::headers(Some(&fresh))?).send().await?)
            }
            None => Ok(response),
        }
    }

    fn resource(&self, collection: &str, id: &str) -> String {
        self.config.url(&format!("{}/{}", collection, encode(id)))
    }

    fn zone(&self) -> ZoneContext {
        ZoneContext::today(self.config.device_tz)
    }

    fn rule_from(&self, dto: &NotificationRuleResponse) -> Result<NotificationRule> {
        rule_from_response(dto, self.zone()).map_err(|e| {
            ApiClientError::invalid_response(format!("Malformed rule {}: {}", dto.id, e))
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Products
    // ─────────────────────────────────────────────────────────────────────────

    /// GET /products?limit&offset
    pub async fn fetch_products(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<PagedResponse<ProductResponse>> {
        let request = self
            .client
            .get(self.config.url("products"))
            .query(&[("limit", limit), ("offset", offset)]);
        parse_response(self.send(request).await?).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Routines
    // ─────────────────────────────────────────────────────────────────────────

    /// GET /routines?limit&offset&performed_after&performed_before
    pub async fn fetch_routines(
        &self,
        limit: u32,
        offset: u32,
        filter: &RoutineFilter,
    ) -> Result<PagedResponse<RoutineResponse>> {
        let mut query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        if let Some(after) = filter.performed_after {
            query.push(("performed_after", after.to_rfc3339()));
        }
        if let Some(before) = filter.performed_before {
            query.push(("performed_before", before.to_rfc3339()));
        }

        let request = self.client.get(self.config.url("routines")).query(&query);
        parse_response(self.send(request).await?).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notification rules
    // ─────────────────────────────────────────────────────────────────────────

    /// GET /notification-rules
    pub async fn fetch_rules(&self) -> Result<ItemsResponse<NotificationRuleResponse>> {
        let request = self.client.get(self.config.url("notification-rules"));
        parse_response(self.send(request).await?).await
    }
}

#[async_trait]
impl ProductRemoteTrait for SkincareApiClient {
    /// POST /products
    async fn add_product(&self, product: &ProductCreate) -> CoreResult<Product> {
        debug!("Adding product {}", product.name);
        let request = self
            .client
            .post(self.config.url("products"))
            .json(&ProductCreateRequest::from(product));
        let dto: ProductResponse = parse_response(self.send(request).await?).await?;
        Ok(dto.into())
    }

    async fn list_products(&self, limit: u32, offset: u32) -> CoreResult<Page<Product>> {
        Ok(page_from(self.fetch_products(limit, offset).await?))
    }

    /// GET /products/{id}
    async fn get_product(&self, product_id: &str) -> CoreResult<Product> {
        let request = self.client.get(self.resource("products", product_id));
        let dto: ProductResponse = parse_response(self.send(request).await?).await?;
        Ok(dto.into())
    }

    /// PATCH /products/{id}
    async fn update_product(
        &self,
        product_id: &str,
        update: &ProductUpdate,
    ) -> CoreResult<Product> {
        let request = self
            .client
            .patch(self.resource("products", product_id))
            .json(&ProductUpdateRequest::from(update));
        let dto: ProductResponse = parse_response(self.send(request).await?).await?;
        Ok(dto.into())
    }

    /// DELETE /products/{id}
    async fn delete_product(&self, product_id: &str) -> CoreResult<()> {
        let request = self.client.delete(self.resource("products", product_id));
        Ok(expect_success(self.send(request).await?).await?)
    }
}

#[async_trait]
impl RoutineRemoteTrait for SkincareApiClient {
    /// POST /routines
    async fn add_routine(&self, routine: &RoutineCreate) -> CoreResult<Routine> {
        let request = self
            .client
            .post(self.config.url("routines"))
            .json(&RoutineCreateRequest::from(routine));
        let dto: RoutineResponse = parse_response(self.send(request).await?).await?;
        Ok(dto.into())
    }

    async fn list_routines(
        &self,
        limit: u32,
        offset: u32,
        filter: &RoutineFilter,
    ) -> CoreResult<Page<Routine>> {
        Ok(page_from(self.fetch_routines(limit, offset, filter).await?))
    }

    /// GET /routines/{id}
    async fn get_routine(&self, routine_id: &str) -> CoreResult<Routine> {
        let request = self.client.get(self.resource("routines", routine_id));
        let dto: RoutineResponse = parse_response(self.send(request).await?).await?;
        Ok(dto.into())
    }

    /// PATCH /routines/{id}
    async fn update_routine(
        &self,
        routine_id: &str,
        update: &RoutineUpdate,
    ) -> CoreResult<Routine> {
        let request = self
            .client
            .patch(self.resource("routines", routine_id))
            .json(&RoutineUpdateRequest::from(update));
        let dto: RoutineResponse = parse_response(self.send(request).await?).await?;
        Ok(dto.into())
    }

    /// DELETE /routines/{id}
    async fn delete_routine(&self, routine_id: &str) -> CoreResult<()> {
        let request = self.client.delete(self.resource("routines", routine_id));
        Ok(expect_success(self.send(request).await?).await?)
    }
}

#[async_trait]
impl NotificationRuleRemoteTrait for SkincareApiClient {
    /// POST /notification-rules
    async fn add_rule(&self, rule: &NotificationRuleCreate) -> CoreResult<NotificationRule> {
        let body = rule_create_request(rule, self.zone());
        debug!("Adding notification rule: {:?}", body);
        let request = self
            .client
            .post(self.config.url("notification-rules"))
            .json(&body);
        let dto: NotificationRuleResponse = parse_response(self.send(request).await?).await?;
        Ok(self.rule_from(&dto)?)
    }

    async fn list_rules(&self) -> CoreResult<Vec<NotificationRule>> {
        let response = self.fetch_rules().await?;
        let rules = response
            .items
            .iter()
            .map(|dto| self.rule_from(dto))
            .collect::<Result<Vec<_>>>()?;
        Ok(rules)
    }

    /// GET /notification-rules/{id}
    async fn get_rule(&self, rule_id: &str) -> CoreResult<NotificationRule> {
        let request = self
            .client
            .get(self.resource("notification-rules", rule_id));
        let dto: NotificationRuleResponse = parse_response(self.send(request).await?).await?;
        Ok(self.rule_from(&dto)?)
    }

    /// PATCH /notification-rules/{id}
    async fn update_rule(
        &self,
        rule_id: &str,
        update: &NotificationRuleUpdate,
    ) -> CoreResult<NotificationRule> {
        let request = self
            .client
            .patch(self.resource("notification-rules", rule_id))
            .json(&rule_update_request(update, self.zone()));
        let dto: NotificationRuleResponse = parse_response(self.send(request).await?).await?;
        Ok(self.rule_from(&dto)?)
    }

    /// DELETE /notification-rules/{id}
    async fn delete_rule(&self, rule_id: &str) -> CoreResult<()> {
        let request = self
            .client
            .delete(self.resource("notification-rules", rule_id));
        Ok(expect_success(self.send(request).await?).await?)
    }
}

#[async_trait]
impl UserRemoteTrait for SkincareApiClient {
    /// POST /users
    async fn register(&self, registration: &UserRegistration) -> CoreResult<User> {
        debug!("Registering user {}", registration.email);
        let request = self
            .client
            .post(self.config.url("users"))
            .json(&UserRegisterRequest {
                email: registration.email.trim(),
                name: &registration.name,
                surname: &registration.surname,
                username: &registration.username,
                password: &registration.password,
            });
        let dto: UserResponse = parse_response(self.send(request).await?).await?;
        Ok(dto.into())
    }

    /// GET /users/me
    async fn me(&self) -> CoreResult<User> {
        let request = self.client.get(self.config.url("users/me"));
        let dto: UserResponse = parse_response(self.send(request).await?).await?;
        Ok(dto.into())
    }

    /// PATCH /users/me
    async fn update_me(&self, update: &UserUpdate) -> CoreResult<User> {
        let request = self
            .client
            .patch(self.config.url("users/me"))
            .json(&UserUpdateRequest::from(update));
        let dto: UserResponse = parse_response(self.send(request).await?).await?;
        Ok(dto.into())
    }
}

#[async_trait]
impl DeviceRemoteTrait for SkincareApiClient {
    /// POST /devices
    async fn register_device(&self, registration: &DeviceRegistration) -> CoreResult<()> {
        debug!("Registering device: {}", registration.meta);
        let request = self
            .client
            .post(self.config.url("devices"))
            .json(&DeviceTokenRequest {
                meta: &registration.meta,
                fcm_token: &registration.push_token,
            });
        Ok(expect_success(self.send(request).await?).await?)
    }
}
