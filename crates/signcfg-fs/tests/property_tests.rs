use proptest::prelude::*;
use signcfg_fs::NormalizedPath;

proptest! {
    #[test]
    fn normalized_paths_never_contain_backslashes(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));
    }

    #[test]
    fn join_then_file_name_returns_segment(
        base in "[a-z]{1,8}(/[a-z]{1,8}){0,3}",
        segment in "[a-z0-9_]{1,12}",
    ) {
        let joined = NormalizedPath::new(&base).join(&segment);
        prop_assert_eq!(joined.file_name(), Some(segment.as_str()));
        prop_assert_eq!(joined.parent(), Some(NormalizedPath::new(&base)));
    }
}
