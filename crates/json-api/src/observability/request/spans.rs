//! HTTP span helpers.

use uuid::Uuid;

/// `METHOD /path` with identifier segments collapsed so routes group together.
pub(super) fn route_name(method: &str, path: &str) -> String {
    format!("{method} {}", normalise_path(path))
}

fn normalise_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_ids_are_collapsed() {
        let path = format!("/tickets/{}", Uuid::now_v7());

        assert_eq!(route_name("DELETE", &path), "DELETE /tickets/{uuid}");
    }

    #[test]
    fn root_and_plain_paths_are_kept() {
        assert_eq!(route_name("GET", "/"), "GET /");
        assert_eq!(route_name("GET", "/healthcheck"), "GET /healthcheck");
    }
}
