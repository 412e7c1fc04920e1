// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Skip/limit arithmetic for 1-based pages.

/// Number of entries before the first entry of `page`.
///
/// Page `0` is treated like page `1`. Saturates instead of overflowing.
#[inline]
pub const fn offset(page: usize, per_page: usize) -> usize {
    page.saturating_sub(1).saturating_mul(per_page)
}

/// Restrict `items` to one page.
pub fn paginate<I: IntoIterator>(
    items: I,
    page: usize,
    per_page: usize,
) -> std::iter::Take<std::iter::Skip<I::IntoIter>> {
    items.into_iter().skip(offset(page, per_page)).take(per_page)
}
