use std::io::Write;

use pcb_tracks::{Board, DesignSettings};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"copper_layer_count": 6, "default_clearance": 127000, "net_clearances": {{"12": 400000}}}}"#
        )
        .unwrap();

        let board = Board::from_settings_file(file.path()).unwrap();
        assert_eq!(board.copper_layer_count(), 6);
        assert_eq!(board.settings().clearance_for_net(12), 400_000);
        assert_eq!(board.settings().clearance_for_net(1), 127_000);
        assert_eq!(board.settings().default_via_drill, DesignSettings::default().default_via_drill);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = DesignSettings::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.json"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"copper_layer_count\": \"four\"}}").unwrap();
        assert!(Board::from_settings_file(file.path()).is_err());
    }
}
