//! Canonical route table.

use super::ApiError;
use crate::menu::domain::MenuItemId;
use crate::order::domain::{OrderId, OrderItemId, OrderNumber};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use std::fmt;
use uuid::Uuid;

/// Bytes escaped when a free-text value is rendered as one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?');

/// Request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read.
    Get,
    /// Create or process.
    Post,
    /// Replace or transition.
    Put,
    /// Remove or cancel.
    Delete,
}

impl Method {
    /// Every supported method.
    pub const ALL: [Self; 4] = [Self::Get, Self::Post, Self::Put, Self::Delete];

    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Method {
    type Error = ApiError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(ApiError::method_not_allowed(value)),
        }
    }
}

/// Order routes under `/orders`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderRoute {
    /// `POST /orders`
    Create,
    /// `GET /orders/:id`
    Get(OrderId),
    /// `GET /orders/by-number/:number`
    GetByNumber(OrderNumber),
    /// `POST /orders/:id/items`
    AddItem(OrderId),
    /// `PUT /orders/:id/items/:itemId`
    EditItem(OrderId, OrderItemId),
    /// `DELETE /orders/:id/items/:itemId`
    RemoveItem(OrderId, OrderItemId),
    /// `PUT /orders/:id/confirm`
    Confirm(OrderId),
    /// `PUT /orders/:id/pickup`
    Pickup(OrderId),
}

/// Menu routes under `/menu`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuRoute {
    /// `GET /menu/categories`
    Categories,
    /// `GET /menu/items-by-category/:category`
    ItemsByCategory(String),
    /// `GET /menu/items`
    Items,
    /// `GET /menu/items/:id`
    Item(MenuItemId),
    /// `POST /menu/items`
    CreateItem,
    /// `PUT /menu/items/:id`
    UpdateItem(MenuItemId),
}

/// Payment routes under `/payments`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentRoute {
    /// `POST /payments/process-system`
    ProcessSystem,
    /// `POST /payments/process-counter`
    ProcessCounter,
    /// `GET /payments/pending-counter`
    PendingCounter,
}

/// Kitchen routes under `/kitchen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KitchenRoute {
    /// `GET /kitchen/queue`
    Queue,
    /// `PUT /kitchen/orders/:id/status`
    UpdateStatus(OrderId),
    /// `DELETE /kitchen/orders/:id`
    Cancel(OrderId),
}

/// Report routes under `/reports`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRoute {
    /// `GET /reports/sales-summary/:date`
    SalesSummary(String),
}

/// A resolved route with its path parameters parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Order routes.
    Orders(OrderRoute),
    /// Menu routes.
    Menu(MenuRoute),
    /// Payment routes.
    Payments(PaymentRoute),
    /// Kitchen routes.
    Kitchen(KitchenRoute),
    /// Report routes.
    Reports(ReportRoute),
}

type Matched = Option<Result<Route, ApiError>>;

impl Route {
    /// Resolves a method and path against the route table.
    ///
    /// Leading, trailing and repeated slashes are ignored, as is a query
    /// string.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed path parameters, a 405 error
    /// when the path exists under a different method, and a 404 error when
    /// no route matches.
    pub fn resolve(method: Method, path: &str) -> Result<Self, ApiError> {
        let segments = split_path(path);
        if let Some(matched) = match_route(method, &segments) {
            return matched;
        }
        let other_method_matches = Method::ALL
            .into_iter()
            .filter(|candidate| *candidate != method)
            .any(|candidate| match_route(candidate, &segments).is_some());
        if other_method_matches {
            Err(ApiError::method_not_allowed(method.as_str()))
        } else {
            Err(ApiError::not_found(format!("no route for {method} {path}")))
        }
    }

    /// Returns the method this route is served under.
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::Orders(OrderRoute::Get(_) | OrderRoute::GetByNumber(_))
            | Self::Menu(
                MenuRoute::Categories
                | MenuRoute::ItemsByCategory(_)
                | MenuRoute::Items
                | MenuRoute::Item(_),
            )
            | Self::Payments(PaymentRoute::PendingCounter)
            | Self::Kitchen(KitchenRoute::Queue)
            | Self::Reports(_) => Method::Get,
            Self::Orders(OrderRoute::Create | OrderRoute::AddItem(_))
            | Self::Menu(MenuRoute::CreateItem)
            | Self::Payments(PaymentRoute::ProcessSystem | PaymentRoute::ProcessCounter) => {
                Method::Post
            }
            Self::Orders(
                OrderRoute::EditItem(..) | OrderRoute::Confirm(_) | OrderRoute::Pickup(_),
            )
            | Self::Menu(MenuRoute::UpdateItem(_))
            | Self::Kitchen(KitchenRoute::UpdateStatus(_)) => Method::Put,
            Self::Orders(OrderRoute::RemoveItem(..)) | Self::Kitchen(KitchenRoute::Cancel(_)) => {
                Method::Delete
            }
        }
    }

    /// Renders the canonical path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Orders(route) => match route {
                OrderRoute::Create => "/orders".to_owned(),
                OrderRoute::Get(id) => format!("/orders/{id}"),
                OrderRoute::GetByNumber(number) => format!("/orders/by-number/{}", number.value()),
                OrderRoute::AddItem(id) => format!("/orders/{id}/items"),
                OrderRoute::EditItem(id, item) | OrderRoute::RemoveItem(id, item) => {
                    format!("/orders/{id}/items/{item}")
                }
                OrderRoute::Confirm(id) => format!("/orders/{id}/confirm"),
                OrderRoute::Pickup(id) => format!("/orders/{id}/pickup"),
            },
            Self::Menu(route) => match route {
                MenuRoute::Categories => "/menu/categories".to_owned(),
                MenuRoute::ItemsByCategory(category) => format!(
                    "/menu/items-by-category/{}",
                    utf8_percent_encode(category, SEGMENT)
                ),
                MenuRoute::Items | MenuRoute::CreateItem => "/menu/items".to_owned(),
                MenuRoute::Item(id) | MenuRoute::UpdateItem(id) => format!("/menu/items/{id}"),
            },
            Self::Payments(route) => match route {
                PaymentRoute::ProcessSystem => "/payments/process-system".to_owned(),
                PaymentRoute::ProcessCounter => "/payments/process-counter".to_owned(),
                PaymentRoute::PendingCounter => "/payments/pending-counter".to_owned(),
            },
            Self::Kitchen(route) => match route {
                KitchenRoute::Queue => "/kitchen/queue".to_owned(),
                KitchenRoute::UpdateStatus(id) => format!("/kitchen/orders/{id}/status"),
                KitchenRoute::Cancel(id) => format!("/kitchen/orders/{id}"),
            },
            Self::Reports(ReportRoute::SalesSummary(date)) => {
                format!("/reports/sales-summary/{date}")
            }
        }
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let without_query = path.split_once('?').map_or(path, |(head, _)| head);
    without_query
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn match_route(method: Method, segments: &[&str]) -> Matched {
    match segments {
        ["orders", rest @ ..] => match_order(method, rest),
        ["menu", rest @ ..] => match_menu(method, rest),
        ["payments", rest @ ..] => match_payment(method, rest),
        ["kitchen", rest @ ..] => match_kitchen(method, rest),
        ["reports", "sales-summary", date] if method == Method::Get => Some(Ok(Route::Reports(
            ReportRoute::SalesSummary((*date).to_owned()),
        ))),
        _ => None,
    }
}

fn match_order(method: Method, segments: &[&str]) -> Matched {
    let route = match (method, segments) {
        (Method::Post, []) => Ok(OrderRoute::Create),
        (Method::Get, ["by-number", number]) => {
            parse_order_number(number).map(OrderRoute::GetByNumber)
        }
        (Method::Get, [id]) => {
            parse_uuid(id, "order id").map(|uuid| OrderRoute::Get(OrderId::from_uuid(uuid)))
        }
        (Method::Post, [id, "items"]) => {
            parse_uuid(id, "order id").map(|uuid| OrderRoute::AddItem(OrderId::from_uuid(uuid)))
        }
        (Method::Put, [id, "items", item]) => {
            parse_line(id, item).map(|(order, line)| OrderRoute::EditItem(order, line))
        }
        (Method::Delete, [id, "items", item]) => {
            parse_line(id, item).map(|(order, line)| OrderRoute::RemoveItem(order, line))
        }
        (Method::Put, [id, "confirm"]) => {
            parse_uuid(id, "order id").map(|uuid| OrderRoute::Confirm(OrderId::from_uuid(uuid)))
        }
        (Method::Put, [id, "pickup"]) => {
            parse_uuid(id, "order id").map(|uuid| OrderRoute::Pickup(OrderId::from_uuid(uuid)))
        }
        _ => return None,
    };
    Some(route.map(Route::Orders))
}

fn match_menu(method: Method, segments: &[&str]) -> Matched {
    let route = match (method, segments) {
        (Method::Get, ["categories"]) => Ok(MenuRoute::Categories),
        (Method::Get, ["items-by-category", category]) => {
            decode_segment(category, "category").map(MenuRoute::ItemsByCategory)
        }
        (Method::Get, ["items"]) => Ok(MenuRoute::Items),
        (Method::Post, ["items"]) => Ok(MenuRoute::CreateItem),
        (Method::Get, ["items", id]) => {
            parse_uuid(id, "menu item id").map(|uuid| MenuRoute::Item(MenuItemId::from_uuid(uuid)))
        }
        (Method::Put, ["items", id]) => parse_uuid(id, "menu item id")
            .map(|uuid| MenuRoute::UpdateItem(MenuItemId::from_uuid(uuid))),
        _ => return None,
    };
    Some(route.map(Route::Menu))
}

fn match_payment(method: Method, segments: &[&str]) -> Matched {
    let route = match (method, segments) {
        (Method::Post, ["process-system"]) => PaymentRoute::ProcessSystem,
        (Method::Post, ["process-counter"]) => PaymentRoute::ProcessCounter,
        (Method::Get, ["pending-counter"]) => PaymentRoute::PendingCounter,
        _ => return None,
    };
    Some(Ok(Route::Payments(route)))
}

fn match_kitchen(method: Method, segments: &[&str]) -> Matched {
    let route = match (method, segments) {
        (Method::Get, ["queue"]) => Ok(KitchenRoute::Queue),
        (Method::Put, ["orders", id, "status"]) => parse_uuid(id, "order id")
            .map(|uuid| KitchenRoute::UpdateStatus(OrderId::from_uuid(uuid))),
        (Method::Delete, ["orders", id]) => {
            parse_uuid(id, "order id").map(|uuid| KitchenRoute::Cancel(OrderId::from_uuid(uuid)))
        }
        _ => return None,
    };
    Some(route.map(Route::Kitchen))
}

fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::validation(format!("invalid {what}: {raw}")))
}

fn decode_segment(raw: &str, what: &str) -> Result<String, ApiError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| ApiError::validation(format!("invalid {what}: {raw}")))
}

fn parse_line(order: &str, line: &str) -> Result<(OrderId, OrderItemId), ApiError> {
    let order_id = OrderId::from_uuid(parse_uuid(order, "order id")?);
    let item_id = OrderItemId::from_uuid(parse_uuid(line, "order item id")?);
    Ok((order_id, item_id))
}

fn parse_order_number(raw: &str) -> Result<OrderNumber, ApiError> {
    let invalid = || ApiError::validation(format!("invalid order number: {raw}"));
    let trimmed = raw.trim_start_matches('#');
    let value = trimmed.parse::<u64>().map_err(|_| invalid())?;
    OrderNumber::new(value).map_err(|_| invalid())
}
