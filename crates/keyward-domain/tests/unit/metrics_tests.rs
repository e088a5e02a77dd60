//! Unit tests for metrics aggregation value objects

use keyward_domain::{MetricsSample, Operation, OperationMetrics, format_error_rate};
use std::time::Duration;

#[test]
fn test_error_rate_formatting() {
    assert_eq!(format_error_rate(0, 0), "0.00%");
    assert_eq!(format_error_rate(1, 4), "25.00%");
    assert_eq!(format_error_rate(1, 3), "33.33%");
    assert_eq!(format_error_rate(2, 3), "66.67%");
    assert_eq!(format_error_rate(5, 5), "100.00%");
}

#[test]
fn test_aggregate_average_and_p95() {
    let latencies: Vec<f64> = (1..=100).map(f64::from).collect();
    let metrics = OperationMetrics::from_samples(100, 10, &latencies);
    assert_eq!(metrics.count, 100);
    assert_eq!(metrics.errors, 10);
    assert!((metrics.average_latency_ms - 50.5).abs() < f64::EPSILON);
    assert!((metrics.p95_latency_ms - 96.0).abs() < f64::EPSILON);
    assert!(metrics.p95_latency_ms >= metrics.average_latency_ms);
    assert_eq!(metrics.error_rate, "10.00%");
}

#[test]
fn test_p95_can_fall_below_average_on_skewed_samples() {
    let mut latencies = vec![0.0; 95];
    latencies.extend([1.0; 4]);
    latencies.push(1000.0);
    let metrics = OperationMetrics::from_samples(100, 0, &latencies);
    assert!((metrics.average_latency_ms - 10.04).abs() < 1e-9);
    assert!((metrics.p95_latency_ms - 1.0).abs() < f64::EPSILON);
    assert!(metrics.p95_latency_ms < metrics.average_latency_ms);
}

#[test]
fn test_aggregate_single_sample() {
    let metrics = OperationMetrics::from_samples(1, 0, &[3.5]);
    assert!((metrics.average_latency_ms - 3.5).abs() < f64::EPSILON);
    assert!((metrics.p95_latency_ms - 3.5).abs() < f64::EPSILON);
}

#[test]
fn test_aggregate_without_samples() {
    let metrics = OperationMetrics::from_samples(0, 0, &[]);
    assert_eq!(metrics.average_latency_ms, 0.0);
    assert_eq!(metrics.p95_latency_ms, 0.0);
    assert_eq!(metrics.error_rate, "0.00%");
}

#[test]
fn test_sample_accessors() {
    let sample = MetricsSample::new(Operation::Encrypt, Duration::from_millis(4), false);
    assert_eq!(sample.operation(), Operation::Encrypt);
    assert_eq!(sample.duration(), Duration::from_millis(4));
    assert!(!sample.success());
}

#[test]
fn test_operation_names_are_unique() {
    let mut names: Vec<&str> = Operation::ALL.iter().map(Operation::as_str).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), Operation::ALL.len());
    assert_eq!(Operation::PasswordHash.as_str(), "passwordHash");
    assert_eq!(Operation::TokenVerification.to_string(), "tokenVerification");
}
