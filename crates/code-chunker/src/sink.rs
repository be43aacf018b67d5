use crate::error::Result;
use crate::types::CodeChunk;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Receiver of finished chunks, called once per chunk in traversal order
pub trait ChunkSink {
    fn emit(&mut self, chunk: CodeChunk) -> Result<()>;
}

impl ChunkSink for Vec<CodeChunk> {
    fn emit(&mut self, chunk: CodeChunk) -> Result<()> {
        self.push(chunk);
        Ok(())
    }
}

/// Delimiter lines written around each chunk by [`MarkedTextSink`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: "=== EMBEDDING CHUNK START ===".to_string(),
            end: "=== EMBEDDING CHUNK END ===".to_string(),
        }
    }
}

/// Writes chunk text between marker lines
pub struct MarkedTextSink<W: Write> {
    writer: W,
    markers: Markers,
}

impl<W: Write> MarkedTextSink<W> {
    pub fn new(writer: W) -> Self {
        Self::with_markers(writer, Markers::default())
    }

    pub fn with_markers(writer: W, markers: Markers) -> Self {
        Self { writer, markers }
    }

    /// Flush and hand back the writer
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> ChunkSink for MarkedTextSink<W> {
    fn emit(&mut self, chunk: CodeChunk) -> Result<()> {
        writeln!(self.writer, "{}", self.markers.start)?;
        writeln!(self.writer, "{}", chunk.content)?;
        writeln!(self.writer, "{}\n", self.markers.end)?;
        Ok(())
    }
}

/// Writes one JSON object per chunk, one per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flush and hand back the writer
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> ChunkSink for JsonLinesSink<W> {
    fn emit(&mut self, chunk: CodeChunk) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &chunk)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkMetadata;

    fn chunk(content: &str) -> CodeChunk {
        CodeChunk::new(
            "X.java".to_string(),
            1,
            2,
            content.to_string(),
            ChunkMetadata::with_language("java"),
        )
    }

    #[test]
    fn test_marked_text_layout() {
        let mut sink = MarkedTextSink::new(Vec::new());
        sink.emit(chunk("class X {\n}\n")).unwrap();
        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "=== EMBEDDING CHUNK START ===\nclass X {\n}\n\n=== EMBEDDING CHUNK END ===\n\n"
        );
    }

    #[test]
    fn test_custom_markers() {
        let markers = Markers {
            start: "<<".to_string(),
            end: ">>".to_string(),
        };
        let mut sink = MarkedTextSink::with_markers(Vec::new(), markers);
        sink.emit(chunk("a\n")).unwrap();
        sink.emit(chunk("b\n")).unwrap();
        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(out, "<<\na\n\n>>\n\n<<\nb\n\n>>\n\n");
    }

    #[test]
    fn test_json_lines() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(chunk("a\n")).unwrap();
        sink.emit(chunk("b\n")).unwrap();
        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();

        let rows: Vec<CodeChunk> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].content, "b\n");
    }

    #[test]
    fn test_vec_sink_keeps_order() {
        let mut sink: Vec<CodeChunk> = Vec::new();
        sink.emit(chunk("first")).unwrap();
        sink.emit(chunk("second")).unwrap();
        assert_eq!(sink[0].content, "first");
        assert_eq!(sink[1].content, "second");
    }
}
