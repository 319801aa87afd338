//! Named pieces of a Wavefront OBJ export

use std::path::Path;

use crate::core::Result;

/// Name used for faces that precede any `o`/`g` statement
const UNNAMED_PIECE: &str = "default";

/// One named object of an OBJ file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjPiece {
    pub name: String,
    /// Materials in first-use order
    pub materials: Vec<String>,
    pub face_count: usize,
}

impl ObjPiece {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            materials: Vec::new(),
            face_count: 0,
        }
    }
}

/// Split OBJ text into its named pieces.
///
/// Statements with the same name are merged; pieces without faces are dropped.
pub fn parse_pieces(text: &str) -> Vec<ObjPiece> {
    let mut pieces: Vec<ObjPiece> = Vec::new();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        let line = line.trim();
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match keyword {
            "o" | "g" if !rest.is_empty() => {
                let index = pieces.iter().position(|p| p.name == rest).unwrap_or_else(|| {
                    pieces.push(ObjPiece::new(rest));
                    pieces.len() - 1
                });
                current = Some(index);
            }
            "usemtl" if !rest.is_empty() => {
                let index = *current.get_or_insert_with(|| {
                    pieces.push(ObjPiece::new(UNNAMED_PIECE));
                    pieces.len() - 1
                });
                let piece = &mut pieces[index];
                if !piece.materials.iter().any(|m| m == rest) {
                    piece.materials.push(rest.to_string());
                }
            }
            "f" => {
                let index = *current.get_or_insert_with(|| {
                    pieces.push(ObjPiece::new(UNNAMED_PIECE));
                    pieces.len() - 1
                });
                pieces[index].face_count += 1;
            }
            _ => {}
        }
    }

    pieces.retain(|p| p.face_count > 0);
    pieces
}

/// Read the pieces of an OBJ file
pub fn read_pieces(path: &Path) -> Result<Vec<ObjPiece>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_pieces(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# exported
mtllib Group_0x0.mtl
v 0 0 0
v 1 0 0
v 1 1 0
g Stone
usemtl Stone
f 1 2 3
f 1 3 2
g Oak_Leaves
usemtl Oak_Leaves
f 1 2 3
g Empty
usemtl Air
g Stone
usemtl Stone_Mossy
f 3 2 1
";

    #[test]
    fn test_named_pieces() {
        let pieces = parse_pieces(SAMPLE);
        assert_eq!(pieces.len(), 2);

        assert_eq!(pieces[0].name, "Stone");
        assert_eq!(pieces[0].face_count, 3);
        assert_eq!(pieces[0].materials, vec!["Stone", "Stone_Mossy"]);

        assert_eq!(pieces[1].name, "Oak_Leaves");
        assert_eq!(pieces[1].materials, vec!["Oak_Leaves"]);
    }

    #[test]
    fn test_faces_without_name() {
        let pieces = parse_pieces("v 0 0 0\nusemtl Dirt\nf 1 1 1\n");
        assert_eq!(pieces, vec![ObjPiece {
            name: UNNAMED_PIECE.to_string(),
            materials: vec!["Dirt".to_string()],
            face_count: 1,
        }]);
    }
}
