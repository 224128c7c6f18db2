//! Dashboard REST API routes (warp-based).

use crate::state::SharedDashboard;
use crate::DashboardError;
use serde::Serialize;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};
use wgida_core::series::{
    comm_columns, pr_columns, shift_window_heatmap, threshold_stacked_area, window_stacked_area,
    window_threshold_heatmap, ColumnSeries, CommColumns, HeatmapGrid, StackedAreaGrid,
};
use wgida_core::{
    overall_detected, overall_sliding, Family, FamilyValues, PageMeta, PageParams, RunSummary,
    SelectionUpdate,
};

/// Build all dashboard API routes under `/api/v1/dashboard/`.
pub fn dashboard_routes(
    dashboard: SharedDashboard,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let api = warp::path("api")
        .and(warp::path("v1"))
        .and(warp::path("dashboard"));

    let health = api
        .and(warp::path("health"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_dashboard(dashboard.clone()))
        .and_then(handle_health);

    let dataset = api
        .and(warp::path("dataset"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_dashboard(dashboard.clone()))
        .and_then(handle_dataset);

    let dataset_values = api
        .and(warp::path("dataset"))
        .and(warp::path("values"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_dashboard(dashboard.clone()))
        .and_then(handle_dataset_values);

    let get_filters = api
        .and(warp::path("filters"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_dashboard(dashboard.clone()))
        .and_then(handle_get_filters);

    let put_filters = api
        .and(warp::path("filters"))
        .and(warp::path::end())
        .and(warp::put())
        .and(warp::body::json())
        .and(with_dashboard(dashboard.clone()))
        .and_then(handle_put_filters);

    let submit = api
        .and(warp::path("filters"))
        .and(warp::path("submit"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_dashboard(dashboard.clone()))
        .and_then(handle_submit);

    let runs = api
        .and(warp::path("runs"))
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<PageParams>())
        .and(with_dashboard(dashboard.clone()))
        .and_then(handle_runs);

    let metrics_pr = api
        .and(warp::path("metrics"))
        .and(warp::path("precision-recall"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_dashboard(dashboard.clone()))
        .and_then(handle_metrics_pr);

    let metrics_comm = api
        .and(warp::path("metrics"))
        .and(warp::path("communication"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_dashboard(dashboard.clone()))
        .and_then(handle_metrics_comm);

    let metrics_heatmaps = api
        .and(warp::path("metrics"))
        .and(warp::path("heatmaps"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_dashboard(dashboard.clone()))
        .and_then(handle_metrics_heatmaps);

    let metrics_stacked = api
        .and(warp::path("metrics"))
        .and(warp::path("stacked-areas"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_dashboard(dashboard))
        .and_then(handle_metrics_stacked);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "PUT", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type"]);

    // Group routes to avoid warp recursive type overflow
    let dataset_routes = health
        .or(dataset)
        .or(dataset_values)
        .or(get_filters)
        .or(put_filters)
        .or(submit)
        .or(runs)
        .boxed();

    let metric_routes = metrics_pr
        .or(metrics_comm)
        .or(metrics_heatmaps)
        .or(metrics_stacked)
        .boxed();

    dataset_routes.or(metric_routes).with(cors)
}

// =============================================================================
// Filters
// =============================================================================

fn with_dashboard(
    dashboard: SharedDashboard,
) -> impl Filter<Extract = (SharedDashboard,), Error = Infallible> + Clone {
    warp::any().map(move || dashboard.clone())
}

// =============================================================================
// Reply types
// =============================================================================

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    runs: usize,
}

#[derive(Debug, Serialize)]
struct DatasetInfo {
    runs: usize,
    streams: usize,
    sizes: usize,
    shifts: usize,
    windows: usize,
    thresholds: usize,
    nodes: usize,
}

#[derive(Debug, Serialize)]
struct SubmitResponse {
    runs: usize,
    filters: FamilyValues,
}

#[derive(Debug, Serialize)]
struct RunsResponse {
    runs: Vec<RunSummary>,
    meta: PageMeta,
}

#[derive(Debug, Serialize)]
struct PrResponse {
    sliding: Vec<ColumnSeries>,
    detected: Vec<ColumnSeries>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HeatmapsResponse {
    shift_window: HeatmapGrid,
    window_threshold: HeatmapGrid,
}

#[derive(Debug, Serialize)]
struct StackedAreasResponse {
    thresholds: StackedAreaGrid,
    windows: StackedAreaGrid,
}

// =============================================================================
// Handlers
// =============================================================================

async fn handle_health(dashboard: SharedDashboard) -> Result<impl Reply, Infallible> {
    let state = dashboard.read().await;
    let resp = HealthResponse {
        status: "ok",
        runs: state.store().len(),
    };
    Ok(warp::reply::with_status(warp::reply::json(&resp), StatusCode::OK).into_response())
}

async fn handle_dataset(dashboard: SharedDashboard) -> Result<impl Reply, Infallible> {
    let state = dashboard.read().await;
    let store = state.store();
    let resp = DatasetInfo {
        runs: store.len(),
        streams: store.distinct_values(Family::Stream).len(),
        sizes: store.distinct_values(Family::Size).len(),
        shifts: store.distinct_values(Family::Shift).len(),
        windows: store.distinct_values(Family::Window).len(),
        thresholds: store.distinct_values(Family::Threshold).len(),
        nodes: store.distinct_values(Family::Nodes).len(),
    };
    Ok(warp::reply::with_status(warp::reply::json(&resp), StatusCode::OK).into_response())
}

async fn handle_dataset_values(dashboard: SharedDashboard) -> Result<impl Reply, Infallible> {
    let state = dashboard.read().await;
    let values = FamilyValues::available(state.store());
    Ok(warp::reply::with_status(warp::reply::json(&values), StatusCode::OK).into_response())
}

async fn handle_get_filters(dashboard: SharedDashboard) -> Result<impl Reply, Infallible> {
    let state = dashboard.read().await;
    let selected = state.selected_values();
    Ok(warp::reply::with_status(warp::reply::json(&selected), StatusCode::OK).into_response())
}

async fn handle_put_filters(
    update: SelectionUpdate,
    dashboard: SharedDashboard,
) -> Result<impl Reply, Infallible> {
    let mut state = dashboard.write().await;
    state.apply(&update);
    let selected = state.selected_values();
    Ok(warp::reply::with_status(warp::reply::json(&selected), StatusCode::OK).into_response())
}

async fn handle_submit(dashboard: SharedDashboard) -> Result<impl Reply, Infallible> {
    let mut state = dashboard.write().await;
    let snapshot = state.submit();
    let resp = SubmitResponse {
        runs: snapshot.runs.len(),
        filters: snapshot.filters.clone(),
    };
    tracing::debug!(runs = resp.runs, "snapshot installed");
    Ok(warp::reply::with_status(warp::reply::json(&resp), StatusCode::OK).into_response())
}

async fn handle_runs(
    params: PageParams,
    dashboard: SharedDashboard,
) -> Result<impl Reply, Infallible> {
    let state = dashboard.read().await;
    match state.snapshot() {
        Ok(snapshot) => {
            let summaries: Vec<RunSummary> =
                snapshot.runs.iter().map(|run| RunSummary::of(run)).collect();
            let (runs, meta) = params.paginate(summaries);
            let resp = RunsResponse { runs, meta };
            Ok(warp::reply::with_status(warp::reply::json(&resp), StatusCode::OK).into_response())
        }
        Err(e) => Ok(dashboard_error_response(e)),
    }
}

async fn handle_metrics_pr(dashboard: SharedDashboard) -> Result<impl Reply, Infallible> {
    let state = dashboard.read().await;
    match state.snapshot() {
        Ok(snapshot) => {
            let resp = PrResponse {
                sliding: pr_columns(&overall_sliding(&snapshot.runs)),
                detected: pr_columns(&overall_detected(&snapshot.runs)),
            };
            Ok(warp::reply::with_status(warp::reply::json(&resp), StatusCode::OK).into_response())
        }
        Err(e) => Ok(dashboard_error_response(e)),
    }
}

async fn handle_metrics_comm(dashboard: SharedDashboard) -> Result<impl Reply, Infallible> {
    let state = dashboard.read().await;
    match state.view() {
        Ok((_, context)) => {
            let columns: CommColumns = comm_columns(context);
            Ok(
                warp::reply::with_status(warp::reply::json(&columns), StatusCode::OK)
                    .into_response(),
            )
        }
        Err(e) => Ok(dashboard_error_response(e)),
    }
}

async fn handle_metrics_heatmaps(dashboard: SharedDashboard) -> Result<impl Reply, Infallible> {
    let state = dashboard.read().await;
    match state.view() {
        Ok((snapshot, context)) => {
            let resp = HeatmapsResponse {
                shift_window: shift_window_heatmap(context, &snapshot.filters),
                window_threshold: window_threshold_heatmap(context, &snapshot.filters),
            };
            Ok(warp::reply::with_status(warp::reply::json(&resp), StatusCode::OK).into_response())
        }
        Err(e) => Ok(dashboard_error_response(e)),
    }
}

async fn handle_metrics_stacked(dashboard: SharedDashboard) -> Result<impl Reply, Infallible> {
    let state = dashboard.read().await;
    match state.view() {
        Ok((snapshot, context)) => {
            let resp = StackedAreasResponse {
                thresholds: threshold_stacked_area(context, &snapshot.filters),
                windows: window_stacked_area(context, &snapshot.filters),
            };
            Ok(warp::reply::with_status(warp::reply::json(&resp), StatusCode::OK).into_response())
        }
        Err(e) => Ok(dashboard_error_response(e)),
    }
}

// =============================================================================
// Error handling
// =============================================================================

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
    code: String,
}

fn error_response(status: StatusCode, code: &str, message: &str) -> warp::reply::Response {
    let body = ApiError {
        error: message.to_string(),
        code: code.to_string(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

fn dashboard_error_response(err: DashboardError) -> warp::reply::Response {
    let (status, code) = match &err {
        DashboardError::NoSnapshot => (StatusCode::CONFLICT, "no_snapshot"),
    };
    error_response(status, code, &err.to_string())
}

/// Handle warp rejections with specific HTTP status codes and messages.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        Ok(error_response(
            StatusCode::BAD_REQUEST,
            "bad_body",
            &format!("Invalid request body: {}", e),
        ))
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        Ok(error_response(
            StatusCode::BAD_REQUEST,
            "bad_query",
            "Invalid query parameters",
        ))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        Ok(error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "method_not_allowed",
            "Method not allowed",
        ))
    } else if err.is_not_found() {
        Ok(error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            "Not found",
        ))
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        Ok(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal",
            "Internal server error",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::shared_dashboard;
    use wgida_core::DatasetStore;

    fn sample_store() -> DatasetStore {
        let payload = serde_json::json!([
            {
                "stream": { "type": "zipf", "size": 100000.0, "shift": 1.0 },
                "config": { "window": 5.0, "threshold": 10, "nodes": 4 },
                "generated": [ { "value": "A" }, { "value": "B" } ],
                "van": {
                    "precision": 0.8, "recall": 0.7,
                    "detected": [ { "value": "A" } ],
                    "comm": { "weighted": { "messages": { "identify": 0.002 } } }
                },
                "sim": { "precision": 0.7, "recall": 0.6, "detected": [] },
                "spl": { "precision": 0.6, "recall": 0.5, "detected": [] },
                "per": { "precision": 1.0, "recall": 1.0,
                         "detected": [ { "value": "A" }, { "value": "B" } ] }
            },
            {
                "stream": { "type": "zipf", "size": 100000.0, "shift": 1.0 },
                "config": { "window": 5.0, "threshold": 10, "nodes": 4 },
                "generated": [ { "value": "A" }, { "value": "B" } ],
                "van": {
                    "precision": 0.6, "recall": 0.5,
                    "detected": [ { "value": "A" }, { "value": "B" } ],
                    "comm": { "weighted": { "messages": { "identify": 0.004 } } }
                },
                "sim": { "precision": 0.5, "recall": 0.4, "detected": [] },
                "spl": { "precision": 0.4, "recall": 0.3, "detected": [] },
                "per": { "precision": 1.0, "recall": 1.0,
                         "detected": [ { "value": "A" }, { "value": "B" } ] }
            },
            {
                "stream": { "type": "uniform", "size": 50000.0, "shift": 0.5 },
                "config": { "window": 10.0, "threshold": 100, "nodes": 8 },
                "generated": [ { "value": "C" } ],
                "van": { "precision": 0.2, "recall": 0.2, "detected": [] },
                "sim": { "precision": 0.3, "recall": 0.3, "detected": [] },
                "spl": { "precision": 0.4, "recall": 0.4, "detected": [] },
                "per": { "precision": 1.0, "recall": 1.0, "detected": [ { "value": "C" } ] }
            }
        ]);
        DatasetStore::new(serde_json::from_value(payload).unwrap())
    }

    fn setup_routes() -> (
        SharedDashboard,
        impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone,
    ) {
        let dashboard = shared_dashboard(sample_store());
        let routes = dashboard_routes(dashboard.clone());
        (dashboard, routes)
    }

    #[tokio::test]
    async fn test_health() {
        let (_dashboard, routes) = setup_routes();

        let resp = warp::test::request()
            .method("GET")
            .path("/api/v1/dashboard/health")
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["runs"], 3);
    }

    #[tokio::test]
    async fn test_dataset_values_sorted_per_family() {
        let (_dashboard, routes) = setup_routes();

        let resp = warp::test::request()
            .method("GET")
            .path("/api/v1/dashboard/dataset/values")
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        let streams = body["streams"].as_array().unwrap();
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[0]["label"], "uniform");
        assert_eq!(streams[1]["label"], "zipf");
        let thresholds = body["thresholds"].as_array().unwrap();
        assert_eq!(thresholds[0]["label"], "10");
        assert_eq!(thresholds[1]["label"], "100");
    }

    #[tokio::test]
    async fn test_metrics_conflict_before_submit() {
        let (_dashboard, routes) = setup_routes();

        for path in [
            "/api/v1/dashboard/metrics/precision-recall",
            "/api/v1/dashboard/metrics/communication",
            "/api/v1/dashboard/metrics/heatmaps",
            "/api/v1/dashboard/metrics/stacked-areas",
            "/api/v1/dashboard/runs",
        ] {
            let resp = warp::test::request()
                .method("GET")
                .path(path)
                .reply(&routes)
                .await;
            assert_eq!(resp.status(), StatusCode::CONFLICT, "{path}");
            let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
            assert_eq!(body["code"], "no_snapshot");
        }
    }

    #[tokio::test]
    async fn test_submit_then_precision_recall() {
        let (_dashboard, routes) = setup_routes();

        let resp = warp::test::request()
            .method("POST")
            .path("/api/v1/dashboard/filters/submit")
            .reply(&routes)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["runs"], 3);

        let resp = warp::test::request()
            .method("GET")
            .path("/api/v1/dashboard/metrics/precision-recall")
            .reply(&routes)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        let sliding = body["sliding"].as_array().unwrap();
        assert_eq!(sliding[0]["id"], "precision");
        // Mean of 0.8, 0.6, 0.2 over the vanilla column, rounded to 3.
        assert_eq!(sliding[0]["data"][0], 0.533);
        let detected = body["detected"].as_array().unwrap();
        assert_eq!(detected[1]["id"], "recall");
        // per detects everything: recall 1.0 in the fourth column.
        assert_eq!(detected[1]["data"][3], 1.0);
    }

    #[tokio::test]
    async fn test_put_filters_then_submit_narrows_runs() {
        let (_dashboard, routes) = setup_routes();

        let resp = warp::test::request()
            .method("PUT")
            .path("/api/v1/dashboard/filters")
            .json(&serde_json::json!({ "streams": ["zipf"] }))
            .reply(&routes)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["streams"].as_array().unwrap().len(), 1);

        let resp = warp::test::request()
            .method("POST")
            .path("/api/v1/dashboard/filters/submit")
            .reply(&routes)
            .await;
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["runs"], 2);

        // Whole-simulation metric over the two zipf runs.
        let resp = warp::test::request()
            .method("GET")
            .path("/api/v1/dashboard/metrics/precision-recall")
            .reply(&routes)
            .await;
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["detected"][0]["data"][0], 1.0);
        assert_eq!(body["detected"][1]["data"][0], 0.75);
    }

    #[tokio::test]
    async fn test_empty_selection_yields_null_means() {
        let (_dashboard, routes) = setup_routes();

        let resp = warp::test::request()
            .method("PUT")
            .path("/api/v1/dashboard/filters")
            .json(&serde_json::json!({ "windows": [] }))
            .reply(&routes)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = warp::test::request()
            .method("POST")
            .path("/api/v1/dashboard/filters/submit")
            .reply(&routes)
            .await;
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["runs"], 0);

        let resp = warp::test::request()
            .method("GET")
            .path("/api/v1/dashboard/metrics/precision-recall")
            .reply(&routes)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        // NaN means serialize as null: a gap, not a zero.
        assert!(body["sliding"][0]["data"][0].is_null());
    }

    #[tokio::test]
    async fn test_heatmaps_follow_active_filters() {
        let (_dashboard, routes) = setup_routes();

        warp::test::request()
            .method("POST")
            .path("/api/v1/dashboard/filters/submit")
            .reply(&routes)
            .await;

        let resp = warp::test::request()
            .method("GET")
            .path("/api/v1/dashboard/metrics/heatmaps")
            .reply(&routes)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        let grid = &body["shiftWindow"];
        assert_eq!(grid["xCategories"], serde_json::json!(["0.5", "1"]));
        assert_eq!(grid["yCategories"], serde_json::json!(["5", "10"]));
        // Cells exist only at (0.5, 10) and (1, 5).
        let van_precision = grid["precision"]["van"].as_array().unwrap();
        assert_eq!(van_precision.len(), 2);
        assert_eq!(van_precision[0], serde_json::json!([0.0, 1.0, 0.2]));
        assert_eq!(van_precision[1], serde_json::json!([1.0, 0.0, 0.7]));
    }

    #[tokio::test]
    async fn test_communication_percent_scaling() {
        let (_dashboard, routes) = setup_routes();

        warp::test::request()
            .method("POST")
            .path("/api/v1/dashboard/filters/submit")
            .reply(&routes)
            .await;

        let resp = warp::test::request()
            .method("GET")
            .path("/api/v1/dashboard/metrics/communication")
            .reply(&routes)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0]["id"], "identify");
        // Mean of 0.002, 0.004, 0.0 -> 0.002, scaled to 0.2%.
        let pct = messages[0]["data"][0].as_f64().unwrap();
        assert!((pct - 0.2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_runs_pagination() {
        let (_dashboard, routes) = setup_routes();

        warp::test::request()
            .method("POST")
            .path("/api/v1/dashboard/filters/submit")
            .reply(&routes)
            .await;

        let resp = warp::test::request()
            .method("GET")
            .path("/api/v1/dashboard/runs?limit=2&offset=0")
            .reply(&routes)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["runs"].as_array().unwrap().len(), 2);
        assert_eq!(body["meta"]["total"], 3);
        assert_eq!(body["meta"]["has_more"], true);

        let resp = warp::test::request()
            .method("GET")
            .path("/api/v1/dashboard/runs?limit=2&offset=2")
            .reply(&routes)
            .await;
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["runs"].as_array().unwrap().len(), 1);
        assert_eq!(body["runs"][0]["stream"], "uniform");
        assert_eq!(body["meta"]["has_more"], false);
    }

    #[tokio::test]
    async fn test_stacked_areas_over_thresholds() {
        let (_dashboard, routes) = setup_routes();

        warp::test::request()
            .method("POST")
            .path("/api/v1/dashboard/filters/submit")
            .reply(&routes)
            .await;

        let resp = warp::test::request()
            .method("GET")
            .path("/api/v1/dashboard/metrics/stacked-areas")
            .reply(&routes)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        let thresholds = &body["thresholds"];
        assert_eq!(thresholds["xCategories"], serde_json::json!(["10", "100"]));
        // Threshold 10 carries the two zipf runs' identify traffic.
        let van = thresholds["data"]["van"].as_array().unwrap();
        assert!((van[0].as_f64().unwrap() - 0.003).abs() < 1e-9);
        assert_eq!(van[1], 0.0);
    }

    #[tokio::test]
    async fn test_bad_body_is_rejected() {
        let (_dashboard, routes) = setup_routes();
        let routes = routes.recover(handle_rejection);

        let resp = warp::test::request()
            .method("PUT")
            .path("/api/v1/dashboard/filters")
            .body("{ not json")
            .reply(&routes)
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (_dashboard, routes) = setup_routes();
        let routes = routes.recover(handle_rejection);

        let resp = warp::test::request()
            .method("GET")
            .path("/api/v1/dashboard/nope")
            .reply(&routes)
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
