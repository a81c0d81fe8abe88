// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Request filters for identifying callers and cache keys.

use std::{convert::Infallible, net::SocketAddr};

use rigmart_core_api::Caller;
use warp::{Filter, path::FullPath};

/// Set by the upstream gateway after authentication.
pub const USER_ID_HEADER: &str = "x-user-id";

pub const ADMIN_HEADER: &str = "x-admin";

pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Identify the caller from the gateway headers.
///
/// Admin rights are only granted to identified users.
#[must_use]
pub fn caller_from_headers(user_id: Option<String>, admin: Option<&str>) -> Caller {
    let Some(user_uid) = non_blank(user_id) else {
        return Caller::Anonymous;
    };
    if admin.is_some_and(is_truthy) {
        Caller::Admin(user_uid)
    } else {
        Caller::User(user_uid)
    }
}

pub fn caller() -> impl Filter<Extract = (Caller,), Error = Infallible> + Clone {
    warp::header::optional::<String>(USER_ID_HEADER)
        .and(warp::header::optional::<String>(ADMIN_HEADER))
        .map(|user_id, admin: Option<String>| caller_from_headers(user_id, admin.as_deref()))
        .or(warp::any().map(|| Caller::Anonymous))
        .unify()
}

/// Identify the client for throttling view counts.
///
/// Identified users are distinguished by their id, anonymous clients
/// by their address. The first address of a proxy chain takes
/// precedence over the remote address.
#[must_use]
pub fn client_id_from_parts(
    user_id: Option<String>,
    forwarded_for: Option<String>,
    remote_addr: Option<SocketAddr>,
) -> String {
    if let Some(user_id) = non_blank(user_id) {
        return format!("user:{user_id}");
    }
    let forwarded_for = non_blank(forwarded_for).and_then(|forwarded_for| {
        non_blank(forwarded_for.split(',').next().map(ToOwned::to_owned))
    });
    if let Some(addr) = forwarded_for {
        return format!("ip:{addr}");
    }
    remote_addr.map_or_else(
        || "ip:unknown".to_owned(),
        |addr| format!("ip:{ip}", ip = addr.ip()),
    )
}

pub fn client_id() -> impl Filter<Extract = (String,), Error = Infallible> + Clone {
    warp::header::optional::<String>(USER_ID_HEADER)
        .and(warp::header::optional::<String>(FORWARDED_FOR_HEADER))
        .and(warp::addr::remote())
        .map(client_id_from_parts)
        .or(warp::addr::remote().map(|remote_addr| client_id_from_parts(None, None, remote_addr)))
        .unify()
}

/// The full request path and the raw query string, which is empty
/// if absent.
pub fn path_and_query() -> impl Filter<Extract = (FullPath, String), Error = Infallible> + Clone {
    warp::path::full().and(
        warp::query::raw()
            .or(warp::any().map(String::new))
            .unify(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_without_user_id() {
        assert_eq!(Caller::Anonymous, caller_from_headers(None, None));
        assert_eq!(Caller::Anonymous, caller_from_headers(Some("  ".into()), None));
        assert_eq!(Caller::Anonymous, caller_from_headers(None, Some("true")));
    }

    #[test]
    fn admin_requires_user_id_and_flag() {
        assert_eq!(
            Caller::User("u1".into()),
            caller_from_headers(Some("u1".into()), Some("false"))
        );
        assert_eq!(
            Caller::Admin("u1".into()),
            caller_from_headers(Some("u1".into()), Some("TRUE"))
        );
        assert_eq!(
            Caller::Admin("u1".into()),
            caller_from_headers(Some(" u1 ".into()), Some("1"))
        );
    }

    #[test]
    fn client_id_precedence() {
        let remote_addr = Some(SocketAddr::from(([192, 0, 2, 1], 40_000)));
        assert_eq!(
            "user:u1",
            client_id_from_parts(Some("u1".into()), Some("198.51.100.7".into()), remote_addr)
        );
        assert_eq!(
            "ip:198.51.100.7",
            client_id_from_parts(None, Some("198.51.100.7, 10.0.0.1".into()), remote_addr)
        );
        assert_eq!("ip:192.0.2.1", client_id_from_parts(None, None, remote_addr));
        assert_eq!("ip:unknown", client_id_from_parts(None, None, None));
    }

    #[tokio::test]
    async fn caller_filter() {
        let caller = warp::test::request()
            .header(USER_ID_HEADER, "u1")
            .header(ADMIN_HEADER, "true")
            .filter(&super::caller())
            .await
            .unwrap();
        assert_eq!(Caller::Admin("u1".into()), caller);
        let caller = warp::test::request()
            .filter(&super::caller())
            .await
            .unwrap();
        assert_eq!(Caller::Anonymous, caller);
    }

    #[tokio::test]
    async fn path_and_query_filter() {
        let (path, query) = warp::test::request()
            .path("/listings?sort=price_asc&page=2")
            .filter(&path_and_query())
            .await
            .unwrap();
        assert_eq!("/listings", path.as_str());
        assert_eq!("sort=price_asc&page=2", query);
        let (path, query) = warp::test::request()
            .path("/categories")
            .filter(&path_and_query())
            .await
            .unwrap();
        assert_eq!("/categories", path.as_str());
        assert!(query.is_empty());
    }
}
