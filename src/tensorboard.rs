//! TensorBoard controls on the trial table

use serde::{Deserialize, Serialize};

/// A TensorBoard process started for some trials
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tensorboard {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub trial_job_id_list: Vec<String>,
}

/// What a menu entry does when clicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    StopAll,
    ShowDetail(String),
}

/// One entry of the TensorBoard context menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub key: String,
    pub text: String,
    pub class_name: String,
    pub action: MenuAction,
}

/// Whether the TensorBoard button is disabled
///
/// It stays enabled while trials are selected or any TensorBoard is running.
pub fn disable_tensorboard(selected_row_ids: &[String], tensorboards: &[Tensorboard]) -> bool {
    selected_row_ids.is_empty() && tensorboards.is_empty()
}

/// Context menu listing running TensorBoards, newest first, with the
/// "stop all" entry at the bottom
pub fn tensorboard_menu(tensorboards: &[Tensorboard]) -> Vec<MenuItem> {
    if tensorboards.is_empty() {
        return Vec::new();
    }

    let stop_all = MenuItem {
        key: "delete".to_string(),
        text: "Stop all tensorBoard".to_string(),
        class_name: "clearAll".to_string(),
        action: MenuAction::StopAll,
    };
    let mut items: Vec<MenuItem> = std::iter::once(stop_all)
        .chain(tensorboards.iter().map(|tb| MenuItem {
            key: tb.id.clone(),
            text: tb.id.clone(),
            class_name: format!("CommandBarButton-{}", tb.status),
            action: MenuAction::ShowDetail(tb.id.clone()),
        }))
        .collect();
    items.reverse();
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tb(id: &str, status: &str) -> Tensorboard {
        Tensorboard {
            id: id.to_string(),
            status: status.to_string(),
            trial_job_id_list: Vec::new(),
        }
    }

    #[test]
    fn test_disable_tensorboard() {
        let selected = vec!["trial-1".to_string()];
        let running = vec![tb("tb1", "RUNNING")];

        assert!(disable_tensorboard(&[], &[]));
        assert!(!disable_tensorboard(&selected, &[]));
        assert!(!disable_tensorboard(&[], &running));
        assert!(!disable_tensorboard(&selected, &running));
    }

    #[test]
    fn test_menu_empty_without_tensorboards() {
        assert!(tensorboard_menu(&[]).is_empty());
    }

    #[test]
    fn test_menu_order_is_reversed() {
        let menu = tensorboard_menu(&[tb("tb1", "RUNNING"), tb("tb2", "DOWNLOADING_DATA")]);

        let keys: Vec<&str> = menu.iter().map(|item| item.key.as_str()).collect();
        assert_eq!(keys, ["tb2", "tb1", "delete"]);
        assert_eq!(menu[0].class_name, "CommandBarButton-DOWNLOADING_DATA");
        assert_eq!(menu[0].action, MenuAction::ShowDetail("tb2".to_string()));
        assert_eq!(menu[2].action, MenuAction::StopAll);
        assert_eq!(menu[2].class_name, "clearAll");
    }

    #[test]
    fn test_tensorboard_deserializes() {
        let json = r#"{"id": "tb1", "status": "RUNNING", "trialJobIdList": ["a", "b"]}"#;
        let tb: Tensorboard = serde_json::from_str(json).unwrap();
        assert_eq!(tb.trial_job_id_list, ["a", "b"]);
    }
}
