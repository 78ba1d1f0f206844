//! Chart options for the trial detail view

use serde_json::{Value, json};

/// Scatter chart option for a trial's intermediate results
///
/// The x axis numbers results from 1; non-finite values serialize as `null`
/// and leave a gap in the series.
pub fn intermediate_graph_option(intermediate: &[f64], trial_id: &str) -> Value {
    let sequence: Vec<usize> = (1..=intermediate.len()).collect();

    json!({
        "title": {
            "text": trial_id,
            "left": "center",
            "textStyle": {
                "fontSize": 16,
                "color": "#333"
            }
        },
        "tooltip": {
            "trigger": "item"
        },
        "xAxis": {
            "data": sequence
        },
        "yAxis": {
            "name": "Default metric",
            "type": "value",
            "data": intermediate,
            "scale": true
        },
        "series": [
            {
                "symbolSize": 6,
                "type": "scatter",
                "data": intermediate
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intermediate_graph_option_axes() {
        let option = intermediate_graph_option(&[0.5, 0.6, 0.7], "Ab3xZ");

        assert_eq!(option["title"]["text"], "Ab3xZ");
        assert_eq!(option["xAxis"]["data"], json!([1, 2, 3]));
        assert_eq!(option["yAxis"]["name"], "Default metric");
        assert_eq!(option["series"][0]["type"], "scatter");
        assert_eq!(option["series"][0]["data"], json!([0.5, 0.6, 0.7]));
    }

    #[test]
    fn test_intermediate_graph_option_empty() {
        let option = intermediate_graph_option(&[], "none");
        assert_eq!(option["xAxis"]["data"], json!([]));
        assert_eq!(option["series"][0]["data"], json!([]));
    }

    #[test]
    fn test_intermediate_graph_option_nan_becomes_null() {
        let option = intermediate_graph_option(&[f64::NAN, 1.0], "t");
        assert_eq!(option["series"][0]["data"], json!([null, 1.0]));
    }
}
