//! Dispatch of resolved routes into the role services.

use super::bodies::{
    AddItemBody, ConfirmOrderBody, CounterPaymentBody, CreateMenuItemBody, EditItemBody,
    KitchenStatusBody, SystemPaymentBody, UpdateMenuItemBody, decode,
};
use super::routes::{KitchenRoute, MenuRoute, Method, OrderRoute, PaymentRoute, ReportRoute};
use super::views::{OrderView, SettlementView, order_views};
use super::{ApiError, ApiReply, ApiResponse, ApiStatus, Route};
use crate::context::OrderingContext;
use crate::menu::{
    ports::MenuRepository,
    services::{AddMenuItemRequest, UpdateMenuItemRequest},
};
use crate::order::{
    domain::PaymentPath,
    ports::OrderRepository,
    services::{
        AddOrderItemRequest, CounterPaymentRequest, EditOrderItemRequest, PaymentOutcome,
        SystemPaymentRequest,
    },
};
use crate::payment::{
    domain::PaymentMethod,
    ports::{PaymentGateway, PaymentRepository},
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

type Handled = Result<ApiReply, ApiError>;

/// Already-parsed request handed over by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Request method.
    pub method: Method,
    /// Request path, e.g. `/orders/by-number/7`.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a request without body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Creates a `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a `POST` request with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    /// Creates a `PUT` request with a JSON body.
    #[must_use]
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path).with_body(body)
    }

    /// Creates a `DELETE` request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Contract-layer entry point.
pub struct OrderingApi<O, M, P, G, C>
where
    O: OrderRepository + 'static,
    M: MenuRepository + 'static,
    P: PaymentRepository + 'static,
    G: PaymentGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    context: Arc<OrderingContext<O, M, P, G, C>>,
}

impl<O, M, P, G, C> Clone for OrderingApi<O, M, P, G, C>
where
    O: OrderRepository + 'static,
    M: MenuRepository + 'static,
    P: PaymentRepository + 'static,
    G: PaymentGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            context: Arc::clone(&self.context),
        }
    }
}

impl<O, M, P, G, C> OrderingApi<O, M, P, G, C>
where
    O: OrderRepository + 'static,
    M: MenuRepository + 'static,
    P: PaymentRepository + 'static,
    G: PaymentGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates the contract layer over a shared context.
    #[must_use]
    pub const fn new(context: Arc<OrderingContext<O, M, P, G, C>>) -> Self {
        Self { context }
    }

    /// Returns the underlying context.
    #[must_use]
    pub fn context(&self) -> &OrderingContext<O, M, P, G, C> {
        &self.context
    }

    /// Handles one request and renders the reply envelope.
    ///
    /// Every failure is rendered as an error envelope; this never fails.
    pub async fn handle(&self, request: ApiRequest) -> ApiReply {
        let reply = match self.dispatch(&request).await {
            Ok(rendered) => rendered,
            Err(err) => {
                if err.status_code() >= 500 {
                    warn!(
                        method = %request.method,
                        path = %request.path,
                        status = err.status_code(),
                        error = %err,
                        "request failed"
                    );
                } else {
                    debug!(
                        method = %request.method,
                        path = %request.path,
                        status = err.status_code(),
                        category = %err.category(),
                        error = %err,
                        "request rejected"
                    );
                }
                ApiReply::from(err)
            }
        };
        debug!(
            method = %request.method,
            path = %request.path,
            status = reply.status_code,
            "request handled"
        );
        reply
    }

    async fn dispatch(&self, request: &ApiRequest) -> Handled {
        let body = request.body.as_ref();
        match Route::resolve(request.method, &request.path)? {
            Route::Orders(route) => self.orders(route, body).await,
            Route::Menu(route) => self.menu(route, body).await,
            Route::Payments(route) => self.payments(route, body).await,
            Route::Kitchen(route) => self.kitchen(route, body).await,
            Route::Reports(ReportRoute::SalesSummary(date)) => {
                let summary = self.context.reports().daily_sales_summary(&date).await?;
                Ok(ApiReply::ok(summary))
            }
        }
    }

    async fn orders(&self, route: OrderRoute, body: Option<&Value>) -> Handled {
        let customer = self.context.customer();
        let order = match route {
            OrderRoute::Create => {
                let order = customer.start_order().await?;
                return Ok(ApiReply::created(OrderView::from(&order), "order created"));
            }
            OrderRoute::Get(order_id) => customer.review_order(order_id).await?,
            OrderRoute::GetByNumber(number) => {
                self.context.cashier().find_by_number(number).await?
            }
            OrderRoute::AddItem(order_id) => {
                let payload: AddItemBody = decode(body)?;
                let mut request =
                    AddOrderItemRequest::new(order_id, payload.menu_item_id, payload.quantity);
                if let Some(text) = payload.customization {
                    request = request.with_customization(text);
                }
                let order = customer.add_item(request).await?;
                return Ok(ApiReply::created(OrderView::from(&order), "item added"));
            }
            OrderRoute::EditItem(order_id, item_id) => {
                let payload: EditItemBody = decode(body)?;
                let mut request = EditOrderItemRequest::new(order_id, item_id, payload.quantity);
                if let Some(text) = payload.customization {
                    request = request.with_customization(text);
                }
                customer.edit_item(request).await?
            }
            OrderRoute::RemoveItem(order_id, item_id) => {
                customer.remove_item(order_id, item_id).await?
            }
            OrderRoute::Confirm(order_id) => {
                let payload: ConfirmOrderBody = decode(body)?;
                let path = PaymentPath::try_from(payload.payment_path.as_str())
                    .map_err(|err| ApiError::validation(err.to_string()))?;
                customer.confirm_order(order_id, path).await?
            }
            OrderRoute::Pickup(order_id) => {
                self.context.cashier().complete_pickup(order_id).await?
            }
        };
        Ok(ApiReply::ok(OrderView::from(&order)))
    }

    async fn menu(&self, route: MenuRoute, body: Option<&Value>) -> Handled {
        let catalog = self.context.menu();
        match route {
            MenuRoute::Categories => Ok(ApiReply::ok(catalog.categories().await?)),
            MenuRoute::ItemsByCategory(category) => {
                Ok(ApiReply::ok(catalog.items_by_category(&category).await?))
            }
            MenuRoute::Items => Ok(ApiReply::ok(catalog.list_items().await?)),
            MenuRoute::Item(item_id) => Ok(ApiReply::ok(catalog.item_details(item_id).await?)),
            MenuRoute::CreateItem => {
                let payload: CreateMenuItemBody = decode(body)?;
                let request = AddMenuItemRequest::new(payload.name, payload.price, payload.category)
                    .with_description(payload.description);
                let item = catalog.add_item(request).await?;
                Ok(ApiReply::created(item, "menu item created"))
            }
            MenuRoute::UpdateItem(item_id) => {
                let payload: UpdateMenuItemBody = decode(body)?;
                let mut request = UpdateMenuItemRequest::new(item_id, payload.price);
                if let Some(category) = payload.category {
                    request = request.with_category(category);
                }
                if let Some(description) = payload.description {
                    request = request.with_description(description);
                }
                Ok(ApiReply::ok(catalog.update_item(request).await?))
            }
        }
    }

    async fn payments(&self, route: PaymentRoute, body: Option<&Value>) -> Handled {
        match route {
            PaymentRoute::ProcessSystem => {
                let payload: SystemPaymentBody = decode(body)?;
                let request = SystemPaymentRequest::new(payload.order_id, payload.card_token);
                match self.context.customer().pay_on_system(request).await? {
                    PaymentOutcome::Captured { order, payment } => Ok(ApiReply::new(
                        200,
                        &ApiResponse::success(SettlementView {
                            order: OrderView::from(&order),
                            payment,
                        })
                        .with_message("payment completed"),
                    )),
                    PaymentOutcome::Failed { order, reason } => {
                        let failure = ApiError::gateway(reason);
                        Ok(ApiReply::new(
                            failure.status_code(),
                            &ApiResponse {
                                status: ApiStatus::Error,
                                message: Some(failure.message().to_owned()),
                                data: Some(OrderView::from(&order)),
                            },
                        ))
                    }
                }
            }
            PaymentRoute::ProcessCounter => {
                let payload: CounterPaymentBody = decode(body)?;
                let method = PaymentMethod::try_from(payload.method.as_str())
                    .map_err(|err| ApiError::validation(err.to_string()))?;
                let settled = self
                    .context
                    .cashier()
                    .complete_counter_payment(CounterPaymentRequest::new(payload.order_id, method))
                    .await?;
                Ok(ApiReply::new(
                    200,
                    &ApiResponse::success(SettlementView {
                        order: OrderView::from(&settled.order),
                        payment: settled.payment,
                    })
                    .with_message("payment completed"),
                ))
            }
            PaymentRoute::PendingCounter => {
                let orders = self.context.cashier().pending_counter_payments().await?;
                Ok(ApiReply::ok(order_views(&orders)))
            }
        }
    }

    async fn kitchen(&self, route: KitchenRoute, body: Option<&Value>) -> Handled {
        let kitchen = self.context.kitchen();
        let order = match route {
            KitchenRoute::Queue => {
                let orders = kitchen.order_queue().await?;
                return Ok(ApiReply::ok(order_views(&orders)));
            }
            KitchenRoute::UpdateStatus(order_id) => {
                let payload: KitchenStatusBody = decode(body)?;
                kitchen.update_status(order_id, &payload.status).await?
            }
            KitchenRoute::Cancel(order_id) => kitchen.cancel(order_id).await?,
        };
        Ok(ApiReply::ok(OrderView::from(&order)))
    }
}
