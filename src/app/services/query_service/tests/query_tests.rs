//! Tests for the query service

use super::*;
use crate::app::models::parse_date;
use crate::app::services::observation_store::SqliteStore;
use crate::app::services::observation_store::tests::{
    TestDataset, create_sample_dataset, create_test_dataset, measurement, sample_measurements,
    sample_stations,
};
use crate::app::services::query_service::QueryService;
use std::collections::BTreeSet;

async fn sample_service() -> (TestDataset, QueryService<SqliteStore>) {
    let dataset = create_sample_dataset().await;
    let service = QueryService::new(dataset.open().await);
    (dataset, service)
}

#[tokio::test]
async fn test_all_precipitation_covers_every_row() {
    let (_dataset, service) = sample_service().await;

    let readings = service.all_precipitation().await.unwrap();
    assert_eq!(readings.len(), sample_measurements().len());
    assert!(readings.windows(2).all(|pair| pair[0].date <= pair[1].date));
}

#[tokio::test]
async fn test_all_stations_unique() {
    let (_dataset, service) = sample_service().await;

    let stations = service.all_stations().await.unwrap();
    let codes: BTreeSet<&str> = stations.iter().map(|s| s.station_id.as_str()).collect();
    assert_eq!(codes.len(), stations.len());
    assert_eq!(stations.len(), sample_stations().len());
}

#[tokio::test]
async fn test_stats_from_end_to_end_example() {
    let rows = vec![
        measurement("S1", "2017-01-01", None, Some(70.0)),
        measurement("S1", "2017-06-01", None, Some(80.0)),
        measurement("S1", "2017-12-01", None, Some(75.0)),
    ];
    let dataset = create_test_dataset(&[Station::new("S1", "ONLY STATION")], &rows).await;
    let service = QueryService::new(dataset.open().await);

    let stats = service.temperature_stats_from("2017-06-01").await.unwrap();
    assert_eq!(
        stats,
        vec![
            DailyTemperatureSummary {
                date: "2017-06-01".to_string(),
                low: Some(80.0),
                avg: Some(80.0),
                high: Some(80.0),
            },
            DailyTemperatureSummary {
                date: "2017-12-01".to_string(),
                low: Some(75.0),
                avg: Some(75.0),
                high: Some(75.0),
            },
        ]
    );
}

#[tokio::test]
async fn test_stats_from_covers_each_date_once() {
    let (_dataset, service) = sample_service().await;
    let start = "2016-09-01";

    let stats = service.temperature_stats_from(start).await.unwrap();

    let returned: Vec<&str> = stats.iter().map(|s| s.date.as_str()).collect();
    let unique: BTreeSet<&str> = returned.iter().copied().collect();
    assert_eq!(returned.len(), unique.len(), "dates must not repeat");
    assert!(returned.iter().all(|date| *date >= start));

    let expected: BTreeSet<String> = sample_measurements()
        .into_iter()
        .map(|m| m.date)
        .filter(|date| date.as_str() >= start)
        .collect();
    let unique: BTreeSet<String> = unique.into_iter().map(String::from).collect();
    assert_eq!(unique, expected);

    for summary in &stats {
        if let (Some(low), Some(avg), Some(high)) = (summary.low, summary.avg, summary.high) {
            assert!(low <= avg && avg <= high, "{:?}", summary);
        }
    }
}

#[tokio::test]
async fn test_stats_range_is_filtered_stats_from() {
    let (_dataset, service) = sample_service().await;

    let from = service.temperature_stats_from("2016-09-01").await.unwrap();
    let range = service
        .temperature_stats_range("2016-09-01", "2017-06-01")
        .await
        .unwrap();

    let expected: Vec<DailyTemperatureSummary> = from
        .into_iter()
        .filter(|s| s.date.as_str() <= "2017-06-01")
        .collect();
    assert_eq!(range, expected);
    assert_eq!(range.len(), 3);
}

#[tokio::test]
async fn test_stats_range_reversed_is_empty() {
    let (_dataset, service) = sample_service().await;

    let stats = service
        .temperature_stats_range("2017-08-23", "2016-01-01")
        .await
        .unwrap();
    assert!(stats.is_empty());
}

#[tokio::test]
async fn test_stats_after_last_date_is_empty() {
    let (_dataset, service) = sample_service().await;

    let stats = service.temperature_stats_from("2020-01-01").await.unwrap();
    assert!(stats.is_empty());
}

#[tokio::test]
async fn test_stats_unpadded_start_is_normalized() {
    let (_dataset, service) = sample_service().await;

    let padded = service.temperature_stats_from("2017-08-01").await.unwrap();
    let unpadded = service.temperature_stats_from("2017-8-1").await.unwrap();
    assert_eq!(padded, unpadded);
}

#[tokio::test]
async fn test_stats_invalid_dates_rejected() {
    let (_dataset, service) = sample_service().await;

    let err = service.temperature_stats_from("yesterday").await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let err = service
        .temperature_stats_range("2017-01-01", "2017-02-31")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_stats_signed_year_rejected() {
    let (_dataset, service) = sample_service().await;

    // A `+` prefix would sort before every stored date if it reached the query
    let err = service.temperature_stats_from("+12345-01-01").await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let err = service
        .temperature_stats_range("2016-01-01", "+12345-01-01")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let err = service.temperature_stats_from(" 2017-08-01").await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_recent_observations_most_active_station() {
    let (_dataset, service) = sample_service().await;

    let recent = service
        .recent_temperature_observations()
        .await
        .unwrap()
        .unwrap();

    assert_eq!(recent.station_id, "S1");
    assert_eq!(recent.last_date, "2017-08-23");
    assert_eq!(recent.first_date, "2016-08-23");

    let window_start = parse_date(&recent.first_date).unwrap();
    let window_end = parse_date(&recent.last_date).unwrap();
    assert_eq!(recent.observations.len(), 4);
    for observation in &recent.observations {
        let date = parse_date(&observation.date).unwrap();
        assert!(date >= window_start && date <= window_end);
    }
}

#[tokio::test]
async fn test_recent_observations_window_uses_dataset_max() {
    // The most active station stopped reporting long before the dataset ends
    let rows = vec![
        measurement("OLD", "2010-01-01", None, Some(60.0)),
        measurement("OLD", "2010-01-02", None, Some(61.0)),
        measurement("OLD", "2010-01-03", None, Some(62.0)),
        measurement("NEW", "2017-08-23", None, Some(80.0)),
    ];
    let dataset = create_test_dataset(&[], &rows).await;
    let service = QueryService::new(dataset.open().await);

    let recent = service
        .recent_temperature_observations()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(recent.station_id, "OLD");
    assert!(recent.observations.is_empty());
}

#[tokio::test]
async fn test_recent_observations_empty_dataset() {
    let dataset = create_test_dataset(&sample_stations(), &[]).await;
    let service = QueryService::new(dataset.open().await);

    assert!(service.recent_temperature_observations().await.unwrap().is_none());
}

#[tokio::test]
async fn test_dataset_summary() {
    let (_dataset, service) = sample_service().await;

    let summary = service.dataset_summary().await.unwrap();
    assert_eq!(summary.station_count, 3);
    assert_eq!(summary.measurement_count, 9);
    assert_eq!(summary.first_date.as_deref(), Some("2015-01-01"));
    assert_eq!(summary.last_date.as_deref(), Some("2017-08-23"));

    let most_active = summary.most_active_station.unwrap();
    assert_eq!(most_active.station_id, "S1");
    assert_eq!(most_active.observations, 5);
}

#[tokio::test]
async fn test_unavailable_store_propagates() {
    let service = QueryService::new(UnavailableStore);

    assert!(matches!(
        service.all_precipitation().await,
        Err(Error::StoreUnavailable { .. })
    ));
    assert!(matches!(
        service.all_stations().await,
        Err(Error::StoreUnavailable { .. })
    ));
    assert!(matches!(
        service.recent_temperature_observations().await,
        Err(Error::StoreUnavailable { .. })
    ));
    assert!(matches!(
        service.temperature_stats_from("2017-01-01").await,
        Err(Error::StoreUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_invalid_argument_checked_before_store() {
    let service = QueryService::new(UnavailableStore);

    let err = service.temperature_stats_from("not-a-date").await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}
