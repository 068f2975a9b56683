//! Entity extractor: counterparties, products, traders and desks.
//!
//! Every dictionary surface found in the query contributes its canonical
//! value(s). When two surfaces of the same class overlap, the longer one
//! covers the shorter at that position, so "fx spot" yields only `FX Spot`
//! while a bare "fx" still expands to `FX Spot` and `FX Forward`.

use std::ops::Range;

use super::{ExtractContext, FilterExtractor};
use crate::lexicon::{Alias, Expansion};
use crate::matching::Matcher;
use crate::report::{title_case, Filter};

/// Field name for counterparty filters.
pub const COUNTERPARTY_FIELD: &str = "counterparty";
/// Field name for product filters.
pub const PRODUCT_FIELD: &str = "product_type";
/// Field name for trader filters.
pub const TRADER_FIELD: &str = "trader";
/// Field name for desk filters.
pub const DESK_FIELD: &str = "desk";

/// Dictionary-substring entity extractor.
pub struct EntityExtractor;

impl FilterExtractor for EntityExtractor {
    fn name(&self) -> &str {
        "extractor:entities"
    }

    fn extract(&self, ctx: &ExtractContext<'_>) -> Vec<Filter> {
        [
            Filter::one_or_many(COUNTERPARTY_FIELD, counterparties(ctx)),
            Filter::one_or_many(PRODUCT_FIELD, products(ctx)),
            Filter::one_or_many(TRADER_FIELD, aliases(ctx, &ctx.lexicon.traders)),
            Filter::one_or_many(DESK_FIELD, aliases(ctx, &ctx.lexicon.desks)),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Matched counterparties, title-cased, in dictionary order.
pub fn counterparties(ctx: &ExtractContext<'_>) -> Vec<String> {
    let surfaces: Vec<&str> = ctx.lexicon.counterparties.iter().map(String::as_str).collect();
    let mut out = Vec::new();
    for index in matched_surfaces(ctx.text, ctx.matcher, &surfaces) {
        push_unique(&mut out, title_case(surfaces[index]));
    }
    out
}

/// Canonical products from every matched synonym, deduplicated.
pub fn products(ctx: &ExtractContext<'_>) -> Vec<String> {
    expansions(ctx, &ctx.lexicon.products)
}

fn expansions(ctx: &ExtractContext<'_>, table: &[Expansion]) -> Vec<String> {
    let surfaces: Vec<&str> = table.iter().map(|e| e.surface.as_str()).collect();
    let mut out = Vec::new();
    for index in matched_surfaces(ctx.text, ctx.matcher, &surfaces) {
        for value in &table[index].values {
            push_unique(&mut out, value.clone());
        }
    }
    out
}

fn aliases(ctx: &ExtractContext<'_>, table: &[Alias]) -> Vec<String> {
    let surfaces: Vec<&str> = table.iter().map(|a| a.surface.as_str()).collect();
    let mut out = Vec::new();
    for index in matched_surfaces(ctx.text, ctx.matcher, &surfaces) {
        push_unique(&mut out, table[index].canonical.clone());
    }
    out
}

/// Indices (in table order) of surfaces with at least one uncovered occurrence.
///
/// An occurrence is covered when a strictly longer surface from the same
/// table occurs over a span that contains it.
pub(crate) fn matched_surfaces(text: &str, matcher: Matcher, surfaces: &[&str]) -> Vec<usize> {
    let spans: Vec<Vec<Range<usize>>> = surfaces
        .iter()
        .map(|surface| {
            if surface.is_empty() {
                Vec::new()
            } else {
                matcher.occurrences(text, surface).collect()
            }
        })
        .collect();

    let covered = |index: usize, span: &Range<usize>| {
        spans.iter().enumerate().any(|(other, other_spans)| {
            other != index
                && surfaces[other].len() > surfaces[index].len()
                && other_spans
                    .iter()
                    .any(|o| o.start <= span.start && span.end <= o.end)
        })
    };

    spans
        .iter()
        .enumerate()
        .filter(|(index, own)| own.iter().any(|span| !covered(*index, span)))
        .map(|(index, _)| index)
        .collect()
}

fn push_unique(out: &mut Vec<String>, value: String) {
    if !out.contains(&value) {
        out.push(value);
    }
}
