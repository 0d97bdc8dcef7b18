use std::fs;
use std::path::Path;
use std::sync::Arc;

use qremiser_digest::HashPipeline;
use qremiser_format::{FormatDetector, FormatError};
use qremiser_types::{
    Event, Fixity, Identifier, IdentifierGenerator, Object, ObjectCharacteristics, Record,
    UuidGenerator, UUID_IDENTIFIER_TYPE,
};
use tracing::{debug, warn};

use crate::error::{RecordError, RecordResult};

/// Characterizes files into preservation records.
///
/// Holds no per-file state, so one assembler can be shared between threads
/// and used for any number of concurrent assemblies.
#[derive(Clone)]
pub struct RecordAssembler {
    pipeline: HashPipeline,
    detector: FormatDetector,
    generator: Arc<dyn IdentifierGenerator>,
    identifier_type: String,
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RecordAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordAssembler")
            .field("pipeline", &self.pipeline)
            .field("detector", &self.detector)
            .field("identifier_type", &self.identifier_type)
            .finish_non_exhaustive()
    }
}

impl RecordAssembler {
    /// Default digests (MD5, SHA-256, CRC32, Adler-32) and random UUIDs.
    pub fn new() -> Self {
        Self {
            pipeline: HashPipeline::default(),
            detector: FormatDetector::default(),
            generator: Arc::new(UuidGenerator),
            identifier_type: UUID_IDENTIFIER_TYPE.to_string(),
        }
    }

    pub fn with_pipeline(mut self, pipeline: HashPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn with_detector(mut self, detector: FormatDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_generator(mut self, generator: Arc<dyn IdentifierGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Type recorded on minted identifiers (`"uuid"` unless changed).
    pub fn with_identifier_type(mut self, kind: impl Into<String>) -> Self {
        self.identifier_type = kind.into();
        self
    }

    pub fn pipeline(&self) -> &HashPipeline {
        &self.pipeline
    }

    /// Characterize the file at `path` into a fresh record.
    ///
    /// `original_name` feeds extension-based format detection and is
    /// recorded on the object. `object_identifier`, when given, is used in
    /// place of a freshly minted one. Event and relationship identifiers are
    /// always minted.
    ///
    /// Any I/O failure aborts the whole assembly, as does an empty
    /// identifier type.
    pub fn assemble(
        &self,
        path: &Path,
        original_name: Option<&str>,
        object_identifier: Option<Identifier>,
    ) -> RecordResult<Record> {
        let characteristics = self.characterize(path, original_name)?;

        let kind = self.identifier_type.as_str();
        let object = Object::file(
            self.generator.generate_or(kind, object_identifier)?,
            characteristics,
            original_name.map(str::to_string),
        );
        let event = Event::description(self.generator.generate(kind)?);
        let record = Record::link(object, event, self.generator.generate(kind)?);

        debug!(
            path = %path.display(),
            object = %record.object().identifier,
            event = %record.event().identifier,
            relationship = %record.relationship().identifier,
            "record assembled"
        );
        Ok(record)
    }

    /// Size, fixities, and format guesses for the file at `path`.
    pub fn characterize(
        &self,
        path: &Path,
        original_name: Option<&str>,
    ) -> RecordResult<ObjectCharacteristics> {
        let size = fs::metadata(path)
            .map_err(|e| RecordError::io(path, e))?
            .len();

        let report = self
            .pipeline
            .digest_file(path)
            .map_err(|e| RecordError::io(path, e))?;
        if report.bytes_read != size {
            warn!(
                path = %path.display(),
                size,
                bytes_read = report.bytes_read,
                "file changed while it was being characterized"
            );
        }

        let formats = self
            .detector
            .detect(path, original_name)
            .map_err(|e| match e {
                FormatError::Io(source) => RecordError::io(path, source),
            })?
            .into_guesses();

        let fixities = report
            .digests
            .into_iter()
            .map(|(alg, hex)| Fixity::new(alg.name(), hex))
            .collect();

        Ok(ObjectCharacteristics {
            size,
            fixities,
            formats,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::io::Write;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::thread;

    use proptest::prelude::*;
    use qremiser_digest::Algorithm;
    use qremiser_types::{FormatSource, TypeError, TypeResult};
    use tempfile::NamedTempFile;

    use super::*;

    const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";
    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn file_with(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    /// Mints `seq:1`, `seq:2`, ... so tests can see which slot got which id.
    struct SequentialGenerator(AtomicU64);

    impl IdentifierGenerator for SequentialGenerator {
        fn generate(&self, kind: &str) -> TypeResult<Identifier> {
            let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            Identifier::new(kind, n.to_string())
        }
    }

    #[test]
    fn empty_file_digests() {
        let file = file_with(b"");
        let record = RecordAssembler::new().assemble(file.path(), None, None).unwrap();
        let c = &record.object().characteristics;
        assert_eq!(c.size, 0);
        assert_eq!(c.fixity("md5"), Some(EMPTY_MD5));
        assert_eq!(c.fixity("sha256"), Some(EMPTY_SHA256));
        assert_eq!(c.fixity("crc32"), Some("00000000"));
        assert_eq!(c.fixity("adler32"), Some("00000001"));
        assert!(c.formats.is_empty());
    }

    #[test]
    fn fixities_follow_default_order() {
        let file = file_with(b"hello world");
        let record = RecordAssembler::new().assemble(file.path(), None, None).unwrap();
        let names: Vec<_> = record
            .object()
            .characteristics
            .fixities
            .iter()
            .map(|f| f.algorithm.as_str())
            .collect();
        assert_eq!(names, vec!["md5", "sha256", "crc32", "adler32"]);
    }

    #[test]
    fn relationship_links_same_assembly() {
        let file = file_with(b"linked");
        let record = RecordAssembler::new().assemble(file.path(), None, None).unwrap();
        let rel = record.relationship();
        assert_eq!(rel.linking_object_identifier, record.object().identifier);
        assert_eq!(rel.linking_event_identifier, record.event().identifier);
        assert_ne!(rel.identifier, record.object().identifier);
        assert_ne!(rel.identifier, record.event().identifier);
    }

    #[test]
    fn identifiers_are_minted_per_slot() {
        let file = file_with(b"x");
        let assembler = RecordAssembler::new()
            .with_generator(Arc::new(SequentialGenerator(AtomicU64::new(0))));
        let record = assembler.assemble(file.path(), None, None).unwrap();
        assert_eq!(record.object().identifier.value(), "1");
        assert_eq!(record.event().identifier.value(), "2");
        assert_eq!(record.relationship().identifier.value(), "3");
        assert_eq!(record.object().identifier.kind(), UUID_IDENTIFIER_TYPE);
    }

    #[test]
    fn identifier_type_applies_to_every_slot() {
        let file = file_with(b"x");
        let record = RecordAssembler::new()
            .with_identifier_type("local")
            .assemble(file.path(), None, None)
            .unwrap();
        assert_eq!(record.object().identifier.kind(), "local");
        assert_eq!(record.event().identifier.kind(), "local");
        assert_eq!(record.relationship().identifier.kind(), "local");
    }

    #[test]
    fn empty_identifier_type_is_rejected() {
        let file = file_with(b"x");
        let err = RecordAssembler::new()
            .with_identifier_type("")
            .assemble(file.path(), None, None)
            .unwrap_err();
        assert!(matches!(
            err,
            RecordError::Identifier(TypeError::EmptyIdentifierType)
        ));
    }

    #[test]
    fn repeat_assembly_same_fixities_new_identities() {
        let file = file_with(b"same bytes twice");
        let assembler = RecordAssembler::new();
        let first = assembler.assemble(file.path(), None, None).unwrap();
        let second = assembler.assemble(file.path(), None, None).unwrap();

        assert_eq!(
            first.object().characteristics.fixities,
            second.object().characteristics.fixities
        );
        assert_ne!(first.object().identifier, second.object().identifier);
        assert_ne!(first.event().identifier, second.event().identifier);
        assert_ne!(first.relationship().identifier, second.relationship().identifier);
    }

    #[test]
    fn text_with_txt_name_has_two_guesses() {
        let file = file_with(b"plain old text\n");
        let record = RecordAssembler::new()
            .assemble(file.path(), Some("letter.txt"), None)
            .unwrap();
        let formats = &record.object().characteristics.formats;
        assert_eq!(formats.len(), 2);
        assert_eq!(formats[0].name, "text/plain");
        assert_eq!(formats[0].note, FormatSource::ContentSignature.note());
        assert_eq!(formats[1].name, "text/plain");
        assert_eq!(formats[1].note, FormatSource::FileExtension.note());
        assert_eq!(record.object().original_name.as_deref(), Some("letter.txt"));
    }

    #[test]
    fn without_original_name_at_most_one_guess() {
        let file = file_with(b"plain old text\n");
        let record = RecordAssembler::new().assemble(file.path(), None, None).unwrap();
        assert!(record.object().characteristics.formats.len() <= 1);
        assert!(record.object().original_name.is_none());
    }

    #[test]
    fn supplied_object_identifier_is_kept() {
        let file = file_with(b"known object");
        let supplied = Identifier::new("ark", "61001/b2mz3f7s").unwrap();
        let record = RecordAssembler::new()
            .assemble(file.path(), None, Some(supplied.clone()))
            .unwrap();
        assert_eq!(record.object().identifier, supplied);
        assert_eq!(record.relationship().linking_object_identifier, supplied);
        assert_ne!(record.event().identifier, supplied);
    }

    #[test]
    fn custom_pipeline_limits_fixities() {
        let file = file_with(b"abc");
        let record = RecordAssembler::new()
            .with_pipeline(HashPipeline::new([Algorithm::Crc32]))
            .assemble(file.path(), None, None)
            .unwrap();
        let fixities = &record.object().characteristics.fixities;
        assert_eq!(fixities, &vec![Fixity::new("crc32", "352441c2")]);
    }

    #[test]
    fn missing_file_aborts_assembly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-uploaded");
        let err = RecordAssembler::new().assemble(&path, Some("x.txt"), None).unwrap_err();
        match err {
            RecordError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RecordAssembler::new().assemble(dir.path(), None, None);
        assert!(matches!(result, Err(RecordError::Io { .. })));
    }

    #[test]
    fn record_serializes_to_output_contract() {
        let file = file_with(b"hello world");
        let record = RecordAssembler::new()
            .assemble(file.path(), Some("hello.txt"), None)
            .unwrap();
        let json = serde_json::to_value(&record).unwrap();

        let object = &json["object"];
        assert_eq!(object["originalName"], "hello.txt");
        assert_eq!(object["objectCategory"], "file");
        assert_eq!(object["objectCharacteristics"]["size"], 11);
        assert_eq!(
            object["objectCharacteristics"]["fixity"][0],
            serde_json::json!({
                "messageDigestAlgorithm": "md5",
                "messageDigest": "5eb63bbbe01eeed093cb22bb8f5acdc3",
            })
        );
        assert_eq!(
            object["objectCharacteristics"]["format"][0]["formatDesignation"]["formatName"],
            "text/plain"
        );

        let event = &json["event"];
        assert_eq!(event["eventType"], "description");
        assert!(event["eventDateTime"].is_string());
        assert_eq!(event["eventOutcomeInformation"]["eventOutcome"], "success");

        let rel = &json["relationship"];
        assert_eq!(rel["relationshipType"], "link");
        assert_eq!(rel["relationshipSubType"], "simple");
        assert_eq!(rel["linkingObjectIdentifier"], object["identifier"]);
        assert_eq!(rel["linkingEventIdentifier"], event["identifier"]);
    }

    #[test]
    fn concurrent_assemblies_have_unique_object_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<_> = (0..100)
            .map(|i| {
                let path = dir.path().join(format!("file-{i}.bin"));
                fs::write(&path, format!("content {i}")).unwrap();
                path
            })
            .collect();

        let assembler = RecordAssembler::new();
        let ids: Vec<Identifier> = thread::scope(|s| {
            let handles: Vec<_> = paths
                .iter()
                .map(|path| {
                    let assembler = &assembler;
                    s.spawn(move || {
                        assembler
                            .assemble(path, None, None)
                            .unwrap()
                            .object()
                            .identifier
                            .clone()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 100);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn size_matches_byte_length(data in proptest::collection::vec(any::<u8>(), 0..50_000)) {
            let file = file_with(&data);
            let record = RecordAssembler::new().assemble(file.path(), None, None).unwrap();
            prop_assert_eq!(record.object().characteristics.size, data.len() as u64);
        }
    }
}
