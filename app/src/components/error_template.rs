//! This module defines the `error_template` component, the page rendered for
//! routes the showcase does not know.
//!
//! On the server it also sets the HTTP status code of the first error.

use http::status::StatusCode;
use leptos::{
    html::{div, h1, p},
    prelude::*,
};
use leptos_router::components::{A, AProps};
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,
}

impl AppError {
    /// Returns the HTTP status code associated with the error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Collects the `AppError`s out of a Leptos `Errors` set.
fn app_errors(errors: Errors) -> Vec<AppError> {
    errors
        .into_iter()
        .filter_map(|(_key, error)| error.downcast_ref::<AppError>().cloned())
        .collect()
}

/// Renders an error page for the given errors.
pub fn component(errors: Errors) -> impl IntoView {
    let errors = app_errors(errors);

    #[cfg(feature = "ssr")]
    {
        use leptos_axum::ResponseOptions;
        if let (Some(response), Some(first)) = (use_context::<ResponseOptions>(), errors.first()) {
            response.set_status(first.status_code());
        }
    }

    let lines: Vec<_> = errors
        .iter()
        .map(|error| {
            p().class("text-xl tracking-widest text-gray-400 uppercase")
                .child(format!("{}| {error}", error.status_code()))
        })
        .collect();

    div().class("grid place-content-center px-4 h-full antialiased").child((
        h1().class("mb-6 text-center").child(if errors.len() > 1 { "Errors" } else { "Error" }),
        lines,
        div().class("mt-6 text-center duration-200 hover:text-[#ffef5c]").child(A(AProps::builder()
            .href("/")
            .children(ToChildren::to_children(|| "Back to the showcase"))
            .build())),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotFound.to_string(), "Not Found");
    }

    #[test]
    fn only_app_errors_are_collected() {
        let mut errors = Errors::default();
        errors.insert_with_default_key(AppError::NotFound);
        let collected = app_errors(errors);
        assert_matches!(collected.as_slice(), [AppError::NotFound]);
    }
}
