//! Property-based tests for format classification and entry name
//! validation.
//!
//! These tests use proptest to generate arbitrary inputs and verify
//! the dispatch and path safety properties hold across a wide range of
//! cases.

#![allow(clippy::expect_used)]

use proptest::prelude::*;
use std::io::Cursor;
use std::path::Path;
use std::path::PathBuf;
use unpacker_core::ArchiveType;
use unpacker_core::EntryPath;
use unpacker_core::ExtractionError;
use unpacker_core::copy::CopyBuffer;
use unpacker_core::copy::copy_with_buffer;
use unpacker_core::formats::detect::detect_extension;
use unpacker_core::formats::detect::detect_format;

proptest! {
    // ========================================================================
    // EXTENSION CLASSIFIER
    // ========================================================================

    /// Names ending in .tar.gz always classify as .tar.gz, never .gz.
    #[test]
    fn prop_tar_gz_never_gz(
        dirs in prop::collection::vec("[a-z0-9.]{1,8}", 0..3),
        stem in "[a-zA-Z0-9_.-]{0,16}"
    ) {
        let mut path: PathBuf = dirs.iter().collect();
        path.push(format!("{stem}.tar.gz"));

        prop_assert_eq!(detect_extension(&path), ".tar.gz");
        prop_assert_eq!(detect_format(&path).ok(), Some(ArchiveType::TarGz));
    }

    /// A .gz suffix without .tar before it is rejected as .gz.
    #[test]
    fn prop_plain_gz_rejected(stem in "[a-zA-Z0-9_-]{1,16}") {
        let path = PathBuf::from(format!("{stem}.gz"));

        prop_assert_eq!(detect_extension(&path), ".gz");
        let is_gz = matches!(
            detect_format(&path),
            Err(ExtractionError::UnsupportedFormat { ref extension }) if extension == ".gz"
        );
        prop_assert!(is_gz);
    }

    /// Only the last dot of the file name counts; directories are ignored.
    #[test]
    fn prop_last_extension_wins(
        dir in "[a-z]{1,8}\\.(zip|rar|7z)",
        inner in "[a-z]{1,8}\\.(txt|doc|tar)",
        (extension, expected) in prop_oneof![
            Just((".zip", ArchiveType::Zip)),
            Just((".rar", ArchiveType::Rar)),
            Just((".7z", ArchiveType::SevenZ)),
            Just((".tgz", ArchiveType::TarGz)),
        ]
    ) {
        let path = Path::new(&dir).join(format!("{inner}{extension}"));
        prop_assert_eq!(detect_format(&path).ok(), Some(expected));
    }

    /// Classification is case-sensitive.
    #[test]
    fn prop_uppercase_rejected(
        stem in "[a-z]{1,8}",
        extension in prop::sample::select(vec![".ZIP", ".RAR", ".7Z", ".TGZ", ".Tar.Gz"])
    ) {
        let path = PathBuf::from(format!("{stem}{extension}"));
        prop_assert!(detect_format(&path).is_err());
    }

    // ========================================================================
    // ENTRY NAME VALIDATION
    // ========================================================================

    /// Plain relative names are accepted unchanged.
    #[test]
    fn prop_valid_relative_paths_accepted(
        components in prop::collection::vec("[a-zA-Z0-9_-]{1,20}", 1..5)
    ) {
        let name = PathBuf::from(components.join("/"));
        let entry = EntryPath::validate(&name).expect("plain relative name");
        prop_assert_eq!(entry.as_path(), name.as_path());
    }

    /// Leading `..` always escapes the destination.
    #[test]
    fn prop_leading_parent_rejected(
        suffix in prop::collection::vec("[a-z]{1,8}", 0..4)
    ) {
        let name = PathBuf::from(format!("../{}", suffix.join("/")));
        let rejected = matches!(
            EntryPath::validate(&name),
            Err(ExtractionError::PathTraversal { .. })
        );
        prop_assert!(rejected);
    }

    /// More `..` components than preceding names escape the destination.
    #[test]
    fn prop_excess_parents_rejected(
        depth in 0usize..5,
        extra in 1usize..4
    ) {
        let mut parts: Vec<String> = (0..depth).map(|i| format!("d{i}")).collect();
        parts.extend(std::iter::repeat_n("..".to_string(), depth + extra));
        parts.push("file.txt".to_string());
        let name = PathBuf::from(parts.join("/"));

        prop_assert!(EntryPath::validate(&name).is_err());
    }

    /// `..` that stays inside the destination is resolved, not rejected.
    #[test]
    fn prop_inner_parent_resolved(
        a in "[a-z]{1,8}",
        b in "[a-z]{1,8}"
    ) {
        let name = PathBuf::from(format!("{a}/../{b}"));
        let entry = EntryPath::validate(&name).expect("stays inside destination");
        prop_assert_eq!(entry.as_path(), Path::new(&b));
    }

    /// Absolute names are rejected.
    #[test]
    fn prop_absolute_rejected(
        components in prop::collection::vec("[a-z]{1,8}", 1..4)
    ) {
        let name = PathBuf::from(format!("/{}", components.join("/")));
        prop_assert!(EntryPath::validate(&name).is_err());
    }

    // ========================================================================
    // COPY BUFFER PROPERTY TESTS
    // ========================================================================

    /// Copy buffer should preserve data integrity for arbitrary inputs.
    #[test]
    fn prop_copy_preserves_data(
        data in prop::collection::vec(any::<u8>(), 0..100_000)
    ) {
        let mut buffer = CopyBuffer::new();
        let mut input = Cursor::new(&data);
        let mut output = Vec::new();

        let copied = copy_with_buffer(&mut input, &mut output, &mut buffer)
            .expect("copy should succeed");

        prop_assert_eq!(copied, data.len() as u64, "should report correct size");
        prop_assert_eq!(output, data, "output must match input exactly");
    }

    /// Reusing buffer should produce identical results.
    #[test]
    fn prop_copy_buffer_reusable(
        data1 in prop::collection::vec(any::<u8>(), 0..10_000),
        data2 in prop::collection::vec(any::<u8>(), 0..10_000)
    ) {
        let mut buffer = CopyBuffer::new();

        let mut output1 = Vec::new();
        copy_with_buffer(&mut Cursor::new(&data1), &mut output1, &mut buffer)
            .expect("first copy");
        prop_assert_eq!(output1, data1);

        let mut output2 = Vec::new();
        copy_with_buffer(&mut Cursor::new(&data2), &mut output2, &mut buffer)
            .expect("second copy");
        prop_assert_eq!(output2, data2);
    }
}
