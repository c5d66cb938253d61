//! Newline-delimited JSON for bulk data.
//!
//! One resource per line, each line a complete compact JSON document. Blank
//! lines are skipped on input. Decoding stops at the first bad line and
//! reports its 1-based number.

use std::io::{BufRead, Write};

use helios_fhir::AnyResource;

use crate::error::{Result, SerdeError};
use crate::json;

/// Serializes resources as NDJSON, one line per resource.
pub fn to_ndjson_string(resources: &[AnyResource]) -> Result<String> {
    let mut out = String::new();
    for resource in resources {
        out.push_str(&json::to_json_string(resource)?);
        out.push('\n');
    }
    Ok(out)
}

/// Writes resources as NDJSON into `writer`.
pub fn to_ndjson_writer<'a, W, I>(resources: I, mut writer: W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a AnyResource>,
{
    for resource in resources {
        json::to_json_writer(resource, &mut writer)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Parses an NDJSON document.
pub fn from_ndjson_str(s: &str) -> Result<Vec<AnyResource>> {
    s.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| decode_line(index + 1, line))
        .collect()
}

/// Parses NDJSON from a buffered reader.
pub fn from_ndjson_reader<R: BufRead>(reader: R) -> Result<Vec<AnyResource>> {
    let mut resources = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        resources.push(decode_line(index + 1, &line)?);
    }
    Ok(resources)
}

fn decode_line(line: usize, text: &str) -> Result<AnyResource> {
    json::from_json_str(text).map_err(|source| SerdeError::Line {
        line,
        source: Box::new(source),
    })
}

#[cfg(all(test, feature = "R4"))]
mod tests {
    use super::*;
    use helios_fhir::FhirError;
    use helios_fhir::r4::{Observation, Patient};

    fn patient(id: &str) -> AnyResource {
        AnyResource::new(Patient {
            id: Some(id.to_string()),
            ..Patient::default()
        })
    }

    #[test]
    fn test_one_line_per_resource() {
        let observation = AnyResource::new(Observation {
            id: Some("o1".to_string()),
            ..Observation::default()
        });
        let text = to_ndjson_string(&[patient("p1"), observation]).unwrap();
        assert_eq!(
            text,
            "{\"resourceType\":\"Patient\",\"id\":\"p1\"}\n{\"resourceType\":\"Observation\",\"id\":\"o1\"}\n"
        );

        let back = from_ndjson_str(&text).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[1].resource_type(), "Observation");
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let text = "\n{\"resourceType\":\"Patient\",\"id\":\"a\"}\n   \n{\"resourceType\":\"Patient\",\"id\":\"b\"}";
        let ids: Vec<_> = from_ndjson_str(text)
            .unwrap()
            .iter()
            .map(|resource| resource.id().map(str::to_string))
            .collect();
        assert_eq!(ids, vec![Some("a".to_string()), Some("b".to_string())]);
    }

    #[test]
    fn test_error_names_the_line() {
        let text = "{\"resourceType\":\"Patient\"}\n\n{\"resourceType\":\"Nope\"}\n";
        let err = from_ndjson_str(text).unwrap_err();
        match &err {
            SerdeError::Line { line, .. } => assert_eq!(*line, 3),
            other => panic!("expected a line error, got {other:?}"),
        }
        assert!(matches!(err.as_fhir(), Some(FhirError::UnknownResourceType(_))));
        assert!(err.to_string().starts_with("line 3: "));
    }

    #[test]
    fn test_reader_and_writer() {
        let resources = vec![patient("a"), patient("b")];
        let mut buffer = Vec::new();
        to_ndjson_writer(&resources, &mut buffer).unwrap();
        let back = from_ndjson_reader(buffer.as_slice()).unwrap();
        assert_eq!(back, resources);
    }
}
