//! Product listing SQL.
//!
//! Renders a [`CompiledQuery`] into PostgreSQL. Each [`Condition`] becomes one conjunct of the
//! `WHERE` clause, with every value bound as a parameter.

use dabro::{
    compiler::CompiledQuery,
    predicate::{Condition, PriceRange, ProductPredicate},
    sorting::{ProductSort, SortDirection, SortField},
};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::{
    products::records::{ProductRecord, ProductUuid},
    tags::Taggable,
};

const SELECT_PRODUCTS_SQL: &str = include_str!("sql/select_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");

/// One page of products matching `query`.
pub(crate) fn select_page(query: &CompiledQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_PRODUCTS_SQL.trim_end());

    push_predicate(&mut builder, &query.predicate);
    push_order(&mut builder, query.sort);

    builder.push(" LIMIT ");
    builder.push_bind(i64::from(query.page.limit()));
    builder.push(" OFFSET ");
    builder.push_bind(i64::try_from(query.page.offset()).unwrap_or(i64::MAX));

    builder
}

/// Number of products matching `predicate`.
pub(crate) fn count(predicate: &ProductPredicate) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(COUNT_PRODUCTS_SQL.trim_end());

    push_predicate(&mut builder, predicate);

    builder
}

/// Products with the given uuids, oldest first.
pub(crate) fn select_by_uuids(products: &[ProductUuid]) -> QueryBuilder<'static, Postgres> {
    let uuids: Vec<Uuid> = products.iter().copied().map(Into::into).collect();

    let mut builder = QueryBuilder::new(SELECT_PRODUCTS_SQL.trim_end());

    builder.push(" WHERE products.uuid = ANY(");
    builder.push_bind(uuids);
    builder.push(")");

    push_order(
        &mut builder,
        ProductSort {
            field: SortField::CreatedAt,
            direction: SortDirection::Ascending,
        },
    );

    builder
}

fn push_predicate(builder: &mut QueryBuilder<'static, Postgres>, predicate: &ProductPredicate) {
    for (index, condition) in predicate.conditions().iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });

        push_condition(builder, condition);
    }
}

fn push_condition(builder: &mut QueryBuilder<'static, Postgres>, condition: &Condition) {
    match condition {
        Condition::Price(range) => push_price_range(builder, range),
        Condition::TenantSlug(slug) => {
            builder.push("tenants.slug = ");
            builder.push_bind(slug.clone());
        }
        Condition::CategorySlugIn(scope) => {
            builder.push("categories.slug = ANY(");
            builder.push_bind(scope.slugs().to_vec());
            builder.push(")");
        }
        Condition::AnyTagNamed(names) => {
            builder.push(format!(
                "EXISTS (SELECT 1 FROM taggables \
                 JOIN tags ON tags.uuid = taggables.tag_uuid \
                 WHERE taggables.taggable_type = '{}' \
                 AND taggables.taggable_uuid = products.uuid \
                 AND tags.name = ANY(",
                ProductRecord::type_as_str()
            ));
            builder.push_bind(names.to_vec());
            builder.push("))");
        }
        Condition::Nothing => {
            builder.push("FALSE");
        }
    }
}

fn push_price_range(builder: &mut QueryBuilder<'static, Postgres>, range: &PriceRange) {
    let bounds = [(">=", range.min()), ("<=", range.max())];

    builder.push("(");

    for (index, (operator, bound)) in bounds
        .into_iter()
        .filter_map(|(operator, bound)| bound.map(|bound| (operator, bound)))
        .enumerate()
    {
        if index > 0 {
            builder.push(" AND ");
        }

        match bound.value() {
            Some(value) => {
                builder.push(format!("products.price {operator} "));
                builder.push_bind(value);
            }
            None => {
                builder.push("FALSE");
            }
        }
    }

    builder.push(")");
}

fn push_order(builder: &mut QueryBuilder<'static, Postgres>, sort: ProductSort) {
    let column = match sort.field {
        SortField::CreatedAt => "products.created_at",
        SortField::Name => "products.name COLLATE \"C\"",
    };

    let direction = match sort.direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };

    builder.push(format!(
        " ORDER BY {column} {direction}, products.uuid ASC"
    ));
}
