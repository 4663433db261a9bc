// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! KML text writer for a rebuilt hierarchy.
//!
//! Output layout: `Document` → zone `Folder` → group `Folder` → `Placemark`.
//! Each placemark carries the new label, the original record's properties
//! and a `Point`. `description` and `styleUrl` map to their KML elements;
//! any other property goes to `ExtendedData`.

use std::io::{self, Write};

use poleline_core::DocumentTree;
use poleline_engine::{Entry, Hierarchy};

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Write `hierarchy` as a KML document named `document_name`.
pub fn write_kml<W: Write, T: DocumentTree>(
    mut out: W,
    hierarchy: &Hierarchy<'_, T>,
    document_name: &str,
) -> io::Result<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(out, r#"<kml xmlns="{}">"#, KML_NAMESPACE)?;
    writeln!(out, "  <Document>")?;
    writeln!(out, "    <name>{}</name>", escape(document_name))?;

    for zone in &hierarchy.zones {
        writeln!(out, "    <Folder>")?;
        writeln!(out, "      <name>{}</name>", escape(&zone.name))?;
        for group in &zone.groups {
            writeln!(out, "      <Folder>")?;
            writeln!(out, "        <name>{}</name>", escape(&group.name))?;
            for entry in &group.entries {
                write_placemark(&mut out, entry)?;
            }
            writeln!(out, "      </Folder>")?;
        }
        writeln!(out, "    </Folder>")?;
    }

    writeln!(out, "  </Document>")?;
    writeln!(out, "</kml>")?;
    out.flush()
}

fn write_placemark<W: Write, T: DocumentTree>(out: &mut W, entry: &Entry<'_, T>) -> io::Result<()> {
    let indent = "          ";
    writeln!(out, "        <Placemark>")?;
    writeln!(out, "{}<name>{}</name>", indent, escape(&entry.label))?;

    let mut extended = Vec::new();
    for (key, value) in entry.record.record_properties() {
        match key {
            "description" => writeln!(out, "{}<description>{}</description>", indent, escape(value))?,
            "styleUrl" => writeln!(out, "{}<styleUrl>{}</styleUrl>", indent, escape(value))?,
            _ => extended.push((key, value)),
        }
    }
    if !extended.is_empty() {
        writeln!(out, "{}<ExtendedData>", indent)?;
        for (key, value) in extended {
            writeln!(
                out,
                r#"{}  <Data name="{}"><value>{}</value></Data>"#,
                indent,
                escape(key),
                escape(value)
            )?;
        }
        writeln!(out, "{}</ExtendedData>", indent)?;
    }

    writeln!(
        out,
        "{}<Point><coordinates>{},{}</coordinates></Point>",
        indent, entry.point.x, entry.point.y
    )?;
    writeln!(out, "        </Placemark>")
}

/// Escape text for element content and double-quoted attributes.
///
/// Tab, line feed and carriage return become character references so they
/// survive attribute normalization. Characters XML 1.0 cannot carry at all
/// (other C0 controls, U+FFFE, U+FFFF) become U+FFFD.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {
                escaped.push(char::REPLACEMENT_CHARACTER)
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use poleline_core::{GeometryKind, Node};
    use poleline_engine::{run, OutputShape, ZoningConfig};

    fn network() -> Node {
        Node::document(vec![
            Node::folder(
                "LINE A",
                vec![
                    Node::placemark(
                        "DISTRIBUTION CABLE",
                        GeometryKind::LineString,
                        "106.0,-6.0 106.01,-6.0",
                    ),
                    Node::placemark(
                        "A1 BOUNDARY",
                        GeometryKind::Polygon,
                        "106.004,-6.006 106.006,-6.006 106.006,-6.005 106.004,-6.005",
                    ),
                ],
            ),
            Node::folder(
                "POLE",
                vec![
                    Node::placemark("P<1>", GeometryKind::Point, "106.005,-5.9999")
                        .with_property("description", "Tom & Jerry")
                        .with_property("material", "steel"),
                    Node::placemark("P2", GeometryKind::Point, "106.005,-6.0055"),
                ],
            ),
        ])
    }

    fn render(config: &ZoningConfig) -> String {
        let doc = network();
        let output = run(&doc, config).unwrap();
        let mut buffer = Vec::new();
        write_kml(&mut buffer, &output.hierarchy, "Feeder \"7\"").unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn escapes_control_characters() {
        assert_eq!(escape("a\tb\r\nc"), "a&#9;b&#13;&#10;c");
        assert_eq!(escape("bell\u{7}null\u{0}"), "bell\u{fffd}null\u{fffd}");
        assert_eq!(escape("tiang \u{e9}"), "tiang \u{e9}");
    }

    #[test]
    fn control_characters_in_properties_stay_well_formed() {
        let doc = Node::document(vec![
            Node::folder(
                "LINE A",
                vec![Node::placemark(
                    "DISTRIBUTION CABLE",
                    GeometryKind::LineString,
                    "106.0,-6.0 106.01,-6.0",
                )],
            ),
            Node::folder(
                "POLE",
                vec![Node::placemark("P1", GeometryKind::Point, "106.005,-5.9999")
                    .with_property("description", "line one\nline two")
                    .with_property("note", "form\u{c}feed")],
            ),
        ]);
        let output = run(&doc, &ZoningConfig::default()).unwrap();
        let mut buffer = Vec::new();
        write_kml(&mut buffer, &output.hierarchy, "Feeder").unwrap();
        let kml = String::from_utf8(buffer).unwrap();

        assert!(kml.contains("<description>line one&#10;line two</description>"));
        assert!(kml.contains("<Data name=\"note\"><value>form\u{fffd}feed</value></Data>"));
        assert!(!kml.contains('\u{c}'));
    }

    #[test]
    fn writes_flat_document() {
        let kml = render(&ZoningConfig {
            prefix: "MR.P".into(),
            ..Default::default()
        });

        assert!(kml.starts_with("<?xml"));
        assert!(kml.contains(r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#));
        assert!(kml.contains("<name>Feeder &quot;7&quot;</name>"));
        assert!(kml.contains("<name>LINE A</name>"));
        assert!(kml.contains("<name>POLE</name>"));
        assert!(kml.contains("<name>MR.P001</name>"));
        assert!(kml.contains("<name>MR.P002</name>"));
        assert!(kml.contains("<description>Tom &amp; Jerry</description>"));
        assert!(kml.contains(r#"<Data name="material"><value>steel</value></Data>"#));
        assert!(kml.contains("<coordinates>106.005,-5.9999</coordinates>"));
        assert!(!kml.contains("P<1>"));
        assert_eq!(kml.matches("<Placemark>").count(), 2);
        assert!(kml.trim_end().ends_with("</kml>"));
    }

    #[test]
    fn writes_boundary_subfolders() {
        let kml = render(&ZoningConfig {
            output_shape: OutputShape::BoundaryNested,
            ..Default::default()
        });

        let boundary = kml.find("<name>A1 BOUNDARY</name>").unwrap();
        let poles = kml.find("<name>POLE</name>").unwrap();
        assert!(boundary < poles);
        assert_eq!(kml.matches("<Folder>").count(), 3);
    }
}
