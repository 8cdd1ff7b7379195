//! Typed decomposition of subnetwork self links
//!
//! A subnetwork self link is the canonical resource path URI, e.g.
//! `https://www.googleapis.com/compute/v1/projects/p1/regions/r1/subnetworks/s1`.
//! The owning project, region and name sit at fixed slash-delimited positions;
//! parsing fails explicitly on anything shorter or shaped differently instead
//! of indexing out of bounds.

use std::str::FromStr;
use thiserror::Error;

// Segment positions in a canonical self link, counting from the scheme.
const PROJECT_SEGMENT: usize = 6;
const REGION_SEGMENT: usize = 8;
const NAME_SEGMENT: usize = 10;
const MIN_SEGMENTS: usize = 11;

#[derive(Debug, Error, PartialEq)]
pub enum SelfLinkError {
    #[error("subnetwork self link has {found} segments, expected at least {MIN_SEGMENTS}: {link}")]
    TooShort { link: String, found: usize },

    #[error("unexpected subnetwork self link layout: {link}")]
    UnexpectedLayout { link: String },
}

/// Identifiers recovered from a subnetwork self link.
#[derive(Debug, Clone, PartialEq)]
pub struct SubnetworkSelfLink {
    pub project: String,
    pub region: String,
    pub name: String,
}

impl FromStr for SubnetworkSelfLink {
    type Err = SelfLinkError;

    fn from_str(link: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = link.split('/').collect();

        if segments.len() < MIN_SEGMENTS {
            return Err(SelfLinkError::TooShort {
                link: link.to_string(),
                found: segments.len(),
            });
        }

        let markers_ok = segments[PROJECT_SEGMENT - 1] == "projects"
            && segments[REGION_SEGMENT - 1] == "regions"
            && segments[NAME_SEGMENT - 1] == "subnetworks";
        if !markers_ok {
            return Err(SelfLinkError::UnexpectedLayout {
                link: link.to_string(),
            });
        }

        Ok(Self {
            project: segments[PROJECT_SEGMENT].to_string(),
            region: segments[REGION_SEGMENT].to_string(),
            name: segments[NAME_SEGMENT].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str =
        "https://www.googleapis.com/compute/v1/projects/p1/regions/r1/subnetworks/s1";

    #[test]
    fn parses_canonical_link() {
        let parsed: SubnetworkSelfLink = CANONICAL.parse().unwrap();
        assert_eq!(parsed.project, "p1");
        assert_eq!(parsed.region, "r1");
        assert_eq!(parsed.name, "s1");
    }

    #[test]
    fn canonical_link_reconstructs_from_parsed_segments() {
        let parsed: SubnetworkSelfLink = CANONICAL.parse().unwrap();
        let rebuilt = format!(
            "https://www.googleapis.com/compute/v1/projects/{}/regions/{}/subnetworks/{}",
            parsed.project, parsed.region, parsed.name
        );
        assert_eq!(rebuilt, CANONICAL);
    }

    #[test]
    fn beta_endpoint_link_parses() {
        let link = "https://www.googleapis.com/compute/beta/projects/my-project/regions/europe-west1/subnetworks/my-subnet";
        let parsed: SubnetworkSelfLink = link.parse().unwrap();
        assert_eq!(parsed.project, "my-project");
        assert_eq!(parsed.region, "europe-west1");
        assert_eq!(parsed.name, "my-subnet");
    }

    #[test]
    fn short_link_is_rejected_not_a_panic() {
        let err = "projects/p1/regions/r1".parse::<SubnetworkSelfLink>().unwrap_err();
        assert!(matches!(err, SelfLinkError::TooShort { found: 4, .. }));
    }

    #[test]
    fn wrong_resource_kind_is_rejected() {
        let link = "https://www.googleapis.com/compute/v1/projects/p1/zones/z1/instances/i1";
        let err = link.parse::<SubnetworkSelfLink>().unwrap_err();
        assert!(matches!(err, SelfLinkError::UnexpectedLayout { .. }));
    }
}
