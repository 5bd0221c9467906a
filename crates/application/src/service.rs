use std::path::Path;

use labelset_domain::{
    annotation_file_name, deduplicate, split, DatasetSplit, LabelTally, PhotoRecord,
    TimeOrdered, VocAnnotation,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    AnnotationWriter, ApplicationError, BlobStore, CategoryReport, DocumentScanner,
    ExportCommand, ExportConfig, ExportReport, ImageInspector, IngestDocumentsCommand,
    IngestReport, LoadFilter, MetadataStore, OutputFolders, RecordFailurePolicy, RecordLoader,
    SourceCategory,
};

pub const TRAIN_SPLIT: &str = "train";
pub const VAL_SPLIT: &str = "val";

pub struct ExportService {
    metadata: Box<dyn MetadataStore>,
    blobs: Box<dyn BlobStore>,
    inspector: Box<dyn ImageInspector>,
    writer: Box<dyn AnnotationWriter>,
    folders: Box<dyn OutputFolders>,
    scanner: Box<dyn DocumentScanner>,
}

impl ExportService {
    pub fn new(
        metadata: Box<dyn MetadataStore>,
        blobs: Box<dyn BlobStore>,
        inspector: Box<dyn ImageInspector>,
        writer: Box<dyn AnnotationWriter>,
        folders: Box<dyn OutputFolders>,
        scanner: Box<dyn DocumentScanner>,
    ) -> Self {
        Self {
            metadata,
            blobs,
            inspector,
            writer,
            folders,
            scanner,
        }
    }

    /// Runs the whole pipeline: load, dedup, shuffle and split every
    /// category, then write the train and val folders.
    pub fn export(&self, command: ExportCommand) -> Result<ExportReport, ApplicationError> {
        let config = command.config;
        config.validate()?;

        let train_folder = self.folders.prepare(&config.output_root, TRAIN_SPLIT)?;
        let val_folder = self.folders.prepare(&config.output_root, VAL_SPLIT)?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut dataset = DatasetSplit::default();
        let mut report = ExportReport {
            output_root: config.output_root.clone(),
            ..ExportReport::default()
        };

        for category in &config.categories {
            let (part, category_report) = self.collect_category(category, &config, &mut rng)?;
            info!(
                category = %category_report.name,
                listed = category_report.listed_blobs,
                loaded = category_report.loaded,
                after_dedup = category_report.after_dedup,
                train = category_report.train,
                val = category_report.val,
                "category collected"
            );
            report.categories.push(category_report);
            dataset.extend(part);
        }

        let DatasetSplit { train, val } = dataset;
        let train_saved =
            self.materialize_all(TRAIN_SPLIT, &train, &train_folder, &config, &mut report)?;
        let val_saved = self.materialize_all(VAL_SPLIT, &val, &val_folder, &config, &mut report)?;
        report.train_saved = train_saved;
        report.val_saved = val_saved;

        info!(
            photos = report.photos_saved(),
            good = report.labels.good,
            bad = report.labels.bad,
            failed = report.failed,
            output = %report.output_root.display(),
            "export complete"
        );
        Ok(report)
    }

    fn collect_category(
        &self,
        category: &SourceCategory,
        config: &ExportConfig,
        rng: &mut ChaCha8Rng,
    ) -> Result<(DatasetSplit, CategoryReport), ApplicationError> {
        let blobs = self.blobs.list_blobs(&category.blob_prefix)?;
        let listed_blobs = blobs.len();

        let filter = LoadFilter::for_category(category, config.min_annotations);
        let records = RecordLoader::new(self.metadata.as_ref()).load(blobs, &filter)?;
        let loaded = records.len();

        let mut records = if category.deduplicate {
            deduplicate(TimeOrdered::sort(records), config.duplicate_window())
        } else {
            records
        };
        let after_dedup = records.len();

        records.shuffle(rng);
        let part = split(records, category.val_ratio);

        let report = CategoryReport {
            name: category.name.clone(),
            listed_blobs,
            loaded,
            after_dedup,
            train: part.train.len(),
            val: part.val.len(),
        };
        Ok((part, report))
    }

    fn materialize_all(
        &self,
        split_name: &str,
        records: &[PhotoRecord],
        folder: &Path,
        config: &ExportConfig,
        report: &mut ExportReport,
    ) -> Result<usize, ApplicationError> {
        let mut saved = 0;
        for record in records {
            match self.materialize(record, folder, &config.source_database) {
                Ok(tally) => {
                    report.labels += tally;
                    saved += 1;
                }
                Err(error) => match config.on_record_error {
                    RecordFailurePolicy::Abort => return Err(error),
                    RecordFailurePolicy::Skip => {
                        warn!(photo_id = %record.id, split = split_name, %error, "skipping photo");
                        report.failed += 1;
                    }
                },
            }
        }
        info!(split = split_name, saved, "split written");
        Ok(saved)
    }

    /// Downloads one photo into `folder` under a free name and writes its
    /// annotation file beside it. On failure neither file is left behind.
    pub fn materialize(
        &self,
        record: &PhotoRecord,
        folder: &Path,
        source_database: &str,
    ) -> Result<LabelTally, ApplicationError> {
        let file_name = self.folders.ensure_unique_name(folder, &record.file_name);
        let image_path = folder.join(&file_name);
        let annotation_path = folder.join(annotation_file_name(&file_name));

        let result = self.write_photo(
            record,
            folder,
            &file_name,
            &image_path,
            &annotation_path,
            source_database,
        );
        if result.is_err() {
            for path in [&image_path, &annotation_path] {
                if let Err(error) = self.folders.discard(path) {
                    warn!(path = %path.display(), %error, "failed to remove partial output");
                }
            }
        }
        result
    }

    fn write_photo(
        &self,
        record: &PhotoRecord,
        folder: &Path,
        file_name: &str,
        image_path: &Path,
        annotation_path: &Path,
        source_database: &str,
    ) -> Result<LabelTally, ApplicationError> {
        self.blobs.download_to(&record.source, image_path)?;

        let size = self.inspector.inspect(image_path)?;
        for annotation in &record.annotations {
            if !annotation.bounds.fits_within(size.width, size.height) {
                warn!(
                    photo_id = %record.id,
                    bounds = ?annotation.bounds,
                    width = size.width,
                    height = size.height,
                    "bounding box exceeds image, clamping"
                );
            }
        }

        let folder_name = folder
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let document = VocAnnotation::for_record(
            record,
            &folder_name,
            file_name,
            &image_path.to_string_lossy(),
            source_database,
            size,
        );
        self.writer.write(&document, annotation_path)?;

        Ok(document.tally())
    }

    /// Loads every `<id>.json` file in a folder into `collection`.
    pub fn ingest_documents(
        &self,
        command: IngestDocumentsCommand,
    ) -> Result<IngestReport, ApplicationError> {
        if command.collection.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "collection must not be empty".to_string(),
            ));
        }

        let scan = self.scanner.scan_documents(&command.folder)?;
        let mut report = IngestReport {
            scanned_files: scan.scanned_files,
            ..IngestReport::default()
        };

        for scanned in scan.documents {
            let document = match self.scanner.read_document(&scanned.path) {
                Ok(document @ Value::Object(_)) => document,
                Ok(_) => {
                    warn!(path = %scanned.path.display(), "document is not a JSON object, rejecting");
                    report.rejected += 1;
                    continue;
                }
                Err(ApplicationError::Decode(error)) => {
                    warn!(path = %scanned.path.display(), %error, "unreadable document, rejecting");
                    report.rejected += 1;
                    continue;
                }
                Err(error) => return Err(error),
            };

            self.metadata
                .put_document(&command.collection, &scanned.id, &document)?;
            report.ingested += 1;
        }
        report.collection_size = self.metadata.count_documents(&command.collection)?;

        info!(
            collection = %command.collection,
            scanned = report.scanned_files,
            ingested = report.ingested,
            rejected = report.rejected,
            collection_size = report.collection_size,
            "documents ingested"
        );
        Ok(report)
    }
}
