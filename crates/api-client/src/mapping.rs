//! Conversions between wire types and domain models.
//!
//! Rule times travel as UTC offset times; the domain keeps them in the
//! device zone. The conversion uses the zone's offset on a reference date
//! (normally today), carried by [`ZoneContext`].

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use skincare_core::notifications::{
    NotificationRule, NotificationRuleCreate, NotificationRuleUpdate, Recurrence,
};
use skincare_core::products::{Product, ProductCreate, ProductUpdate};
use skincare_core::routines::{Routine, RoutineCreate, RoutineUpdate};
use skincare_core::users::{User, UserUpdate};
use skincare_core::utils::time_utils::{
    format_utc_offset_time, local_time_to_utc, parse_offset_time_as_utc, today_in,
    utc_time_to_local,
};
use skincare_core::Page;

use crate::types::*;

/// Device zone and the date whose offset applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneContext {
    pub tz: Tz,
    pub on: NaiveDate,
}

impl ZoneContext {
    pub fn new(tz: Tz, on: NaiveDate) -> Self {
        Self { tz, on }
    }

    pub fn today(tz: Tz) -> Self {
        Self::new(tz, today_in(tz))
    }

    /// Device-local time to the wire representation.
    pub fn to_wire(&self, local: NaiveTime) -> String {
        format_utc_offset_time(local_time_to_utc(local, self.on, self.tz))
    }

    /// Wire representation (any offset) to device-local time.
    pub fn from_wire(&self, value: &str) -> skincare_core::Result<NaiveTime> {
        let utc = parse_offset_time_as_utc(value)?;
        Ok(utc_time_to_local(utc, self.on, self.tz))
    }
}

pub fn page_from<T, U: Into<T>>(response: PagedResponse<U>) -> Page<T> {
    let PagedResponse {
        items,
        meta,
        pagination,
    } = response;
    Page::new(
        items.into_iter().map(Into::into).collect(),
        pagination.offset,
        pagination.limit,
        meta.total,
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Products
// ─────────────────────────────────────────────────────────────────────────────

impl From<ProductResponse> for Product {
    fn from(dto: ProductResponse) -> Self {
        Product {
            id: dto.id,
            name: dto.name,
            brand: dto.brand,
            purpose: dto.purpose,
            description: dto.description,
        }
    }
}

impl From<&ProductCreate> for ProductCreateRequest {
    fn from(product: &ProductCreate) -> Self {
        ProductCreateRequest {
            name: product.name.trim().to_string(),
            brand: product.brand.clone(),
            purpose: product.purpose.clone(),
            description: product.description.clone(),
        }
    }
}

impl From<&ProductUpdate> for ProductUpdateRequest {
    fn from(update: &ProductUpdate) -> Self {
        ProductUpdateRequest {
            name: update.name.clone(),
            brand: update.brand.clone(),
            purpose: update.purpose.clone(),
            description: update.description.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Routines
// ─────────────────────────────────────────────────────────────────────────────

impl From<RoutineResponse> for Routine {
    fn from(dto: RoutineResponse) -> Self {
        Routine {
            id: dto.id,
            routine_type: dto.routine_type,
            notes: dto.notes,
            performed_at: dto.performed_at,
            products: dto.products.into_iter().map(Product::from).collect(),
        }
    }
}

impl From<&RoutineCreate> for RoutineCreateRequest {
    fn from(routine: &RoutineCreate) -> Self {
        RoutineCreateRequest {
            routine_type: routine.routine_type,
            notes: routine.notes.clone(),
            performed_at: routine.performed_at,
            product_ids: routine.product_ids.clone(),
        }
    }
}

impl From<&RoutineUpdate> for RoutineUpdateRequest {
    fn from(update: &RoutineUpdate) -> Self {
        RoutineUpdateRequest {
            routine_type: update.routine_type.clone(),
            notes: update.notes.clone(),
            performed_at: update.performed_at.clone(),
            product_ids: update.product_ids.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Notification rules
// ─────────────────────────────────────────────────────────────────────────────

impl TryFrom<&NotificationRuleResponse> for Recurrence {
    type Error = skincare_core::Error;

    /// The payload must match the frequency tag exactly.
    fn try_from(dto: &NotificationRuleResponse) -> Result<Self, Self::Error> {
        Recurrence::from_parts(dto.frequency, dto.every_n, dto.weekdays.clone())
    }
}

pub fn rule_from_response(
    dto: &NotificationRuleResponse,
    zone: ZoneContext,
) -> skincare_core::Result<NotificationRule> {
    Ok(NotificationRule {
        id: dto.id.clone(),
        time_of_day: zone.from_wire(&dto.time_of_day)?,
        enabled: dto.enabled,
        recurrence: Recurrence::try_from(dto)?,
    })
}

pub fn rule_create_request(
    rule: &NotificationRuleCreate,
    zone: ZoneContext,
) -> NotificationRuleCreateRequest {
    NotificationRuleCreateRequest {
        time_of_day: zone.to_wire(rule.time_of_day),
        frequency: rule.frequency(),
        every_n: rule.recurrence.every_n(),
        weekdays: rule.recurrence.weekdays().map(|mask| mask.flags()),
    }
}

pub fn rule_update_request(
    update: &NotificationRuleUpdate,
    zone: ZoneContext,
) -> NotificationRuleUpdateRequest {
    NotificationRuleUpdateRequest {
        time_of_day: update.time_of_day.clone().map(|t| zone.to_wire(t)),
        frequency: update.frequency.clone(),
        every_n: update.every_n.clone(),
        weekdays: update.weekdays.clone().map(|mask| mask.flags()),
        enabled: update.enabled.clone(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

impl From<UserResponse> for User {
    fn from(dto: UserResponse) -> Self {
        User {
            id: dto.id,
            email: dto.email,
            name: dto.name,
            surname: dto.surname,
            username: dto.username,
        }
    }
}

impl From<&UserUpdate> for UserUpdateRequest {
    fn from(update: &UserUpdate) -> Self {
        UserUpdateRequest {
            email: update.email.clone(),
            name: update.name.clone(),
            surname: update.surname.clone(),
        }
    }
}
