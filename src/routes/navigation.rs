use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub const BROWSE_PATH: &str = "/careers";
const APPLY_PREFIX: &str = "/careers/apply/";

/// Careers pages reachable by path. Browse state is never encoded in the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Browse,
    Apply { job_id: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Browse => BROWSE_PATH.to_string(),
            Route::Apply { job_id } => format!("{}{}", APPLY_PREFIX, job_id),
        }
    }

    pub fn job_id(&self) -> Option<&str> {
        match self {
            Route::Apply { job_id } => Some(job_id),
            Route::Browse => None,
        }
    }

    /// Accepts either a route path or a bare vacancy id.
    pub fn from_target(target: &str) -> Result<Self, Error> {
        let target = target.trim();
        if target.starts_with('/') {
            target.parse()
        } else if target.is_empty() {
            Err(Error::BadRequest("A vacancy id is required".to_string()))
        } else {
            Ok(Route::Apply {
                job_id: target.to_string(),
            })
        }
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let path = path.trim().trim_end_matches('/');
        if path == BROWSE_PATH {
            return Ok(Route::Browse);
        }
        match path.strip_prefix(APPLY_PREFIX) {
            Some(id) if !id.is_empty() && !id.contains('/') => Ok(Route::Apply {
                job_id: id.to_string(),
            }),
            _ => Err(Error::BadRequest(format!("No careers page at '{}'", path))),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Browse,
            Route::Apply {
                job_id: "65f1c0ffee".into(),
            },
        ] {
            assert_eq!(route.path().parse::<Route>().unwrap(), route);
        }
    }

    #[test]
    fn browse_rejects_query_and_unknown_paths() {
        assert!("/careers?page=2".parse::<Route>().is_err());
        assert!("/careers/apply/".parse::<Route>().is_err());
        assert!("/about".parse::<Route>().is_err());
        assert_eq!("/careers/".parse::<Route>().unwrap(), Route::Browse);
    }

    #[test]
    fn bare_ids_become_apply_routes() {
        let route = Route::from_target("42").unwrap();
        assert_eq!(route.job_id(), Some("42"));
        assert!(Route::from_target("  ").is_err());
    }
}
