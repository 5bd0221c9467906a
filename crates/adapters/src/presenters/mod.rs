use labelset_application::{CategoryReport, ExportReport, IngestReport};

pub fn present_category_row(category: &CategoryReport) -> String {
    format!(
        "{}\tlisted={}\tloaded={}\tafter_dedup={}\ttrain={}\tval={}",
        category.name,
        category.listed_blobs,
        category.loaded,
        category.after_dedup,
        category.train,
        category.val
    )
}

pub fn present_export_report(report: &ExportReport) -> Vec<String> {
    let mut lines: Vec<String> = report.categories.iter().map(present_category_row).collect();
    lines.push(format!(
        "photos saved: {} (train={}, val={}, failed={})",
        report.photos_saved(),
        report.train_saved,
        report.val_saved,
        report.failed
    ));
    lines.push(format!(
        "good_weld: {}, bad_weld: {}",
        report.labels.good, report.labels.bad
    ));
    lines.push(format!("output root: {}", report.output_root.display()));
    lines
}

pub fn present_ingest_report(collection: &str, report: &IngestReport) -> String {
    format!(
        "ingest into {collection} finished: scanned={}, ingested={}, rejected={}, documents={}",
        report.scanned_files, report.ingested, report.rejected, report.collection_size
    )
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use labelset_domain::LabelTally;

    use super::*;

    #[test]
    fn export_report_lists_categories_then_totals() {
        let report = ExportReport {
            categories: vec![CategoryReport {
                name: "processed".to_string(),
                listed_blobs: 12,
                loaded: 10,
                after_dedup: 8,
                train: 6,
                val: 2,
            }],
            train_saved: 6,
            val_saved: 2,
            failed: 0,
            labels: LabelTally { good: 9, bad: 4 },
            output_root: PathBuf::from("downloaded_photos"),
        };

        let lines = present_export_report(&report);
        assert_eq!(
            lines[0],
            "processed\tlisted=12\tloaded=10\tafter_dedup=8\ttrain=6\tval=2"
        );
        assert_eq!(lines[1], "photos saved: 8 (train=6, val=2, failed=0)");
        assert_eq!(lines[2], "good_weld: 9, bad_weld: 4");
        assert_eq!(lines[3], "output root: downloaded_photos");
    }

    #[test]
    fn ingest_report_includes_collection_size() {
        let report = IngestReport {
            scanned_files: 4,
            ingested: 3,
            rejected: 1,
            collection_size: 7,
        };
        assert_eq!(
            present_ingest_report("photos_3", &report),
            "ingest into photos_3 finished: scanned=4, ingested=3, rejected=1, documents=7"
        );
    }
}
