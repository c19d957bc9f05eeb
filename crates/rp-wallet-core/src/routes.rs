use crate::wizard::{self, SCHEMES};
use rp_tx_builders::TransactionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Transaction(TransactionKind),
    Scheme(&'static str),
    NotFound,
}

impl Route {
    /// Resolves a client-side path. Query strings and fragments are ignored.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["tx", slug] => TransactionKind::from_slug(slug).map_or(Route::NotFound, Route::Transaction),
            ["scheme", name] => wizard::scheme(name).map_or(Route::NotFound, |scheme| Route::Scheme(scheme.name)),
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_owned(),
            Route::Transaction(kind) => format!("/tx/{}", kind.slug()),
            Route::Scheme(name) => format!("/scheme/{name}"),
            Route::NotFound => "/404".to_owned(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Ripplet",
            Route::Transaction(kind) => kind.label(),
            Route::Scheme(name) => wizard::scheme(name).map_or("Scheme", |scheme| scheme.title),
            Route::NotFound => "Page not found",
        }
    }
}

/// Every routable page, home first.
pub fn all() -> Vec<Route> {
    std::iter::once(Route::Home)
        .chain(TransactionKind::ALL.into_iter().map(Route::Transaction))
        .chain(SCHEMES.iter().map(|scheme| Route::Scheme(scheme.name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_inverse_of_path() {
        for route in all() {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::parse("/tx/clawback"), Route::NotFound);
        assert_eq!(Route::parse("/scheme/amm"), Route::NotFound);
        assert_eq!(Route::parse("/settings/extra/deep"), Route::NotFound);
        assert_eq!(Route::parse("/404"), Route::NotFound);
    }

    #[test]
    fn parse_tolerates_trailing_slash_and_query() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/tx/trust-set/?from=home"), Route::Transaction(TransactionKind::TrustSet));
        assert_eq!(Route::parse("/scheme/mpt#step-2"), Route::Scheme("mpt"));
    }
}
