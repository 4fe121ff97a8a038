// End-to-end scrape cycles against a mocked Central API:
//  - one AP with two radios expands into 5 + 4 series
//  - token exchange fails on the network, scrape goes on with the old token
//  - successful exchange rotates the token before any resource is fetched
//  - upstream unreachable, scrape still renders the exporter's own metrics

#[cfg(test)]
mod test {

    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;

    use crate::auth::authenticator::RefreshOutcome;
    use crate::metrics::descriptors::DescriptorId;
    use crate::observability::routes::ScrapeState;
    use crate::resources::ResourceClass;
    use crate::scrape::coordinator::Phase;
    use crate::tests::common::{coordinator, json, mock_all_resources, mock_resource, series_lines, token_store, AP_PATH};

    const UNREACHABLE: &str = "http://127.0.0.1:9";

    #[tokio::test]
    async fn one_access_point_with_two_radios_yields_nine_series() {
        let server = MockServer::start_async().await;
        mock_resource(
            &server,
            AP_PATH,
            json!({"aps": [{
                "name": "ap-1", "group_name": "campus", "site": "hq", "status": "Up",
                "firmware_version": "10.4.0.1", "model": "AP-515", "client_count": 3,
                "radios": [
                    {"band": 0, "channel": "6", "radio_name": "Radio 2.4 GHz"},
                    {"band": 1, "channel": "44", "radio_name": "Radio 5 GHz"}
                ]
            }]}),
        )
        .await;

        let coordinator = coordinator(&server.base_url(), &server.base_url(), token_store(3600));
        let report = coordinator.collect().await;

        assert_eq!(report.succeeded, vec![ResourceClass::AccessPoints]);
        assert_eq!(report.samples.len(), 9);
        let ap_labels = vec!["ap-1", "campus", "hq", "Up", "10.4.0.1", "AP-515"];
        assert!(report.samples[..5].iter().all(|s| s.labels == ap_labels));
        assert_eq!(report.samples[0].descriptor, DescriptorId::ApClientCount);
        assert_eq!(report.samples[0].value, 3.0);
        assert!(report.samples[5..].iter().all(|s| s.labels[3] == "ap-1"));

        let body = ScrapeState::new(coordinator).render().await.unwrap();
        let ap_series = series_lines(&body, "aruba_ap_");
        assert_eq!(ap_series.len(), 9);
        assert!(ap_series.iter().all(|line| line.contains("name=\"ap-1\"") || line.contains("apName=\"ap-1\"")));
        assert!(series_lines(&body, "aruba_switch_").is_empty());
    }

    #[tokio::test]
    async fn token_exchange_network_failure_keeps_prior_token() {
        let server = MockServer::start_async().await;
        mock_all_resources(&server).await;

        let store = token_store(5);
        let coordinator = coordinator(UNREACHABLE, &server.base_url(), store.clone());
        let before = store.snapshot().await;

        let report = coordinator.collect().await;

        assert_eq!(report.refresh, RefreshOutcome::Failed);
        assert!(report.failed.is_empty());
        assert_eq!(report.samples.len(), 9 + 4 + 6 + 17 + 2);
        assert_eq!(store.snapshot().await, before);
        assert_eq!(coordinator.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn successful_exchange_rotates_token_before_fetching() {
        let server = MockServer::start_async().await;
        let exchange = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/oauth2/token")
                    .query_param("grant_type", "refresh_token")
                    .query_param("refresh_token", "refresh-0");
                then.status(200).json_body(json!({
                    "access_token": "access-1",
                    "refresh_token": "refresh-1",
                    "token_type": "bearer",
                    "expires_in": 7200
                }));
            })
            .await;
        let aps = server
            .mock_async(|when, then| {
                when.method(GET).path(AP_PATH).header("authorization", "Bearer access-1");
                then.status(200).json_body(json!({"aps": [{"name": "ap-1"}]}));
            })
            .await;

        let store = token_store(59);
        let coordinator = coordinator(&server.base_url(), &server.base_url(), store.clone());
        let report = coordinator.collect().await;

        assert_eq!(report.refresh, RefreshOutcome::Refreshed { expires_in: 7200, refresh_token_rotated: true });
        assert_eq!(exchange.calls_async().await, 1);
        assert_eq!(aps.calls_async().await, 1);
        assert_eq!(report.samples.len(), 5);

        let state = store.snapshot().await;
        assert_eq!(state.access_token, "access-1");
        assert_eq!(state.refresh_token, "refresh-1");
        assert_eq!(state.expires_in_seconds, 7200);
    }

    #[tokio::test]
    async fn unreachable_upstream_still_renders_exporter_metrics() {
        let coordinator = coordinator(UNREACHABLE, UNREACHABLE, token_store(3600));
        let report = coordinator.collect().await;

        assert!(report.samples.is_empty());
        assert_eq!(report.failed.len(), ResourceClass::ALL.len());
        assert!(report.failed.iter().all(|(_, reason)| *reason == "transport"));

        let body = ScrapeState::new(coordinator).render().await.unwrap();
        assert!(series_lines(&body, "aruba_ap_").is_empty());
        assert!(body.contains("aruba_exporter_scrapes_total"));
        assert!(body.contains("aruba_exporter_resource_fetch_failures_total"));
    }
}
