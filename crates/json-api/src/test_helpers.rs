//! Test helpers.

use std::sync::Arc;

use dabro::references::Reference;
use dabro_app::{
    context::AppContext,
    domain::{
        categories::{
            MockCategoriesService,
            records::{CategoryRecord, CategoryUuid},
        },
        checkout::MockCheckoutService,
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid, RefundPolicy},
        },
        tags::{
            MockTagsService,
            records::{TagRecord, TagUuid},
        },
        tenants::{
            MockTenantsService,
            records::{TenantRecord, TenantUuid},
        },
    },
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use crate::state::State;

/// Service mocks for one test. Unconfigured mocks fail the test if called.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) products: MockProductsService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) tenants: MockTenantsService,
    pub(crate) tags: MockTagsService,
    pub(crate) checkout: MockCheckoutService,
}

impl Mocks {
    fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            categories: Arc::new(self.categories),
            tenants: Arc::new(self.tenants),
            tags: Arc::new(self.tags),
            checkout: Arc::new(self.checkout),
        })
    }

    /// Serve `route` with these mocks injected as application state.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}

pub(crate) fn make_tenant(slug: &str) -> TenantRecord {
    TenantRecord {
        uuid: TenantUuid::new(),
        name: format!("{slug} store"),
        slug: slug.to_owned(),
        image: None,
        stripe_account_id: Some(format!("acct_{slug}")),
        stripe_details_submitted: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_category(slug: &str, parent: Option<CategoryUuid>) -> CategoryRecord {
    CategoryRecord {
        uuid: CategoryUuid::new(),
        name: slug.to_owned(),
        slug: slug.to_owned(),
        color: None,
        parent,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A product of the `store` tenant, tagged `tag`, priced in whole units.
pub(crate) fn make_product(name: &str, price: i64) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        name: name.to_owned(),
        description: None,
        price: Decimal::new(price, 0),
        category: Some(Reference::Populated(make_category("books", None))),
        tenant: Reference::Populated(make_tenant("store")),
        image: None,
        tags: vec![TagRecord {
            uuid: TagUuid::new(),
            name: "tag".to_owned(),
        }],
        refund_policy: RefundPolicy::default(),
        content: Some("download link".to_owned()),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
