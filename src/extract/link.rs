// src/extract/link.rs

//! Monitoring link for a running deployment.

/// Path of the classic "Deployment Status" detail page.
pub const MONITOR_PATH: &str =
    "/changemgmt/monitorDeploymentsDetails.apexp?retURL=/changemgmt/monitorDeployment.apexp&asyncId=";

/// The job id used by the monitoring page: the Deploy ID without its last
/// three characters (18-character id to its 15-character form).
///
/// Identifiers of three characters or fewer yield an empty job id.
pub fn job_id(deploy_id: &str) -> &str {
    match deploy_id.char_indices().rev().nth(2) {
        Some((cut, _)) => &deploy_id[..cut],
        None => "",
    }
}

/// Build the URL operators open to follow the deployment.
pub fn deploy_link_url(environment: &str, deploy_id: &str) -> String {
    format!(
        "{}{}{}",
        environment.trim_end_matches('/'),
        MONITOR_PATH,
        job_id(deploy_id)
    )
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn job_id_drops_three_characters() {
        assert_eq!(job_id("ABC123XYZ"), "ABC123");
        assert_eq!(job_id("0Af5g00000ABCDEFGH"), "0Af5g00000ABCDE");
    }

    #[test]
    fn short_ids_yield_empty_job_id() {
        assert_eq!(job_id("ABC"), "");
        assert_eq!(job_id("A"), "");
        assert_eq!(job_id(""), "");
    }

    #[test]
    fn url_uses_job_id_and_environment() {
        assert_eq!(
            deploy_link_url("https://org.my.salesforce.com", "0Af5g00000ABCDEFGH"),
            "https://org.my.salesforce.com/changemgmt/monitorDeploymentsDetails.apexp\
             ?retURL=/changemgmt/monitorDeployment.apexp&asyncId=0Af5g00000ABCDE"
        );
    }

    #[test]
    fn trailing_slash_on_environment_is_dropped() {
        let url = deploy_link_url("https://org.my.salesforce.com/", "ABC123XYZ");
        assert!(url.starts_with("https://org.my.salesforce.com/changemgmt/"));
        assert!(url.ends_with("asyncId=ABC123"));
    }

    proptest! {
        #[test]
        fn job_id_is_a_prefix_three_chars_shorter(id in "\\PC{3,30}") {
            let job = job_id(&id);
            prop_assert!(id.starts_with(job));
            prop_assert_eq!(job.chars().count(), id.chars().count() - 3);
        }
    }
}
