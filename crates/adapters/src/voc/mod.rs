//! Pascal VOC XML output.

use std::fs;
use std::io::Write;
use std::path::Path;

use labelset_application::{AnnotationWriter, ApplicationError};
use labelset_domain::{VocAnnotation, VocObject};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const INDENT_SIZE: usize = 4;

#[derive(Debug, Default)]
pub struct QuickXmlAnnotationWriter;

impl AnnotationWriter for QuickXmlAnnotationWriter {
    fn write(&self, annotation: &VocAnnotation, path: &Path) -> Result<(), ApplicationError> {
        let xml = render_annotation(annotation)?;
        fs::write(path, xml).map_err(|error| {
            ApplicationError::Io(format!("failed to write {}: {error}", path.display()))
        })
    }
}

/// Serializes `annotation` as a UTF-8 VOC document with an XML declaration.
pub fn render_annotation(annotation: &VocAnnotation) -> Result<String, ApplicationError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    write_document(&mut writer, annotation)
        .map_err(|error| ApplicationError::Io(error.to_string()))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|error| ApplicationError::Decode(error.to_string()))
}

fn write_document<W: Write>(
    writer: &mut Writer<W>,
    annotation: &VocAnnotation,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    open(writer, "annotation")?;

    text(writer, "folder", &annotation.folder)?;
    text(writer, "filename", &annotation.filename)?;
    text(writer, "path", &annotation.path)?;

    open(writer, "source")?;
    text(writer, "database", &annotation.database)?;
    close(writer, "source")?;

    open(writer, "size")?;
    text(writer, "width", &annotation.size.width.to_string())?;
    text(writer, "height", &annotation.size.height.to_string())?;
    text(writer, "depth", &annotation.size.depth.to_string())?;
    close(writer, "size")?;

    for object in &annotation.objects {
        write_object(writer, object)?;
    }

    close(writer, "annotation")
}

fn write_object<W: Write>(writer: &mut Writer<W>, object: &VocObject) -> Result<(), quick_xml::Error> {
    open(writer, "object")?;
    text(writer, "name", object.label.as_str())?;

    open(writer, "bndbox")?;
    text(writer, "xmin", &object.bounds.x_left.to_string())?;
    text(writer, "xmax", &object.bounds.x_right.to_string())?;
    text(writer, "ymin", &object.bounds.y_top.to_string())?;
    text(writer, "ymax", &object.bounds.y_bottom.to_string())?;
    close(writer, "bndbox")?;

    close(writer, "object")
}

fn open<W: Write>(writer: &mut Writer<W>, tag: &str) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    Ok(())
}

fn close<W: Write>(writer: &mut Writer<W>, tag: &str) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn text<W: Write>(writer: &mut Writer<W>, tag: &str, value: &str) -> Result<(), quick_xml::Error> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(value))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelset_domain::{BoundingBox, ImageSize, WeldLabel};
    use tempfile::TempDir;

    fn sample() -> VocAnnotation {
        VocAnnotation {
            folder: "train".to_string(),
            filename: "20250717_181545_592272.jpg".to_string(),
            path: "downloaded_photos/train/20250717_181545_592272.jpg".to_string(),
            database: "weldLabel".to_string(),
            size: ImageSize {
                width: 100,
                height: 80,
                depth: 3,
            },
            objects: vec![
                VocObject {
                    label: WeldLabel::Good,
                    bounds: BoundingBox::new(0, 5, 100, 40),
                },
                VocObject {
                    label: WeldLabel::Bad,
                    bounds: BoundingBox::new(10, 20, 30, 40),
                },
            ],
        }
    }

    fn compact(xml: &str) -> String {
        xml.lines().map(str::trim).collect()
    }

    #[test]
    fn renders_voc_tag_tree() {
        let xml = compact(&render_annotation(&sample()).expect("render"));

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
        assert!(xml.contains("<folder>train</folder>"));
        assert!(xml.contains("<filename>20250717_181545_592272.jpg</filename>"));
        assert!(xml.contains("<path>downloaded_photos/train/20250717_181545_592272.jpg</path>"));
        assert!(xml.contains("<source><database>weldLabel</database></source>"));
        assert!(xml.contains("<size><width>100</width><height>80</height><depth>3</depth></size>"));
        assert!(xml.contains(
            "<object><name>good_weld</name><bndbox><xmin>0</xmin><xmax>100</xmax><ymin>5</ymin><ymax>40</ymax></bndbox></object>"
        ));
        assert!(xml.contains("<name>bad_weld</name>"));
        assert!(xml.ends_with("</annotation>"));
    }

    #[test]
    fn escapes_special_characters() {
        let mut annotation = sample();
        annotation.folder = "a&b".to_string();
        let xml = render_annotation(&annotation).expect("render");
        assert!(xml.contains("<folder>a&amp;b</folder>"));
    }

    #[test]
    fn writes_file_next_to_image() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("photo.xml");
        QuickXmlAnnotationWriter
            .write(&sample(), &path)
            .expect("write");
        let written = fs::read_to_string(&path).expect("read");
        assert!(written.contains("<annotation>"));
    }
}
