use crate::backend::Backend;
use crate::store::RenderedNode;

/// Joins the assignments of `nodes` (already in dependency order) with
/// newlines. Nodes without code and statements that render empty are skipped.
pub fn emit<'a, B, I>(backend: &B, nodes: I) -> String
where
    B: Backend + ?Sized,
    I: IntoIterator<Item = &'a RenderedNode>,
{
    nodes
        .into_iter()
        .filter(|node| !node.code.is_empty())
        .map(|node| backend.render_assignment(node))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Squiggle;
    use crate::store::GuessKind;

    fn rendered(name: &str, code: &str) -> RenderedNode {
        RenderedNode {
            id: name.into(),
            name: name.into(),
            label: name.to_uppercase(),
            kind: GuessKind::Point,
            code: code.into(),
        }
    }

    #[test]
    fn test_skips_nodes_without_code() {
        let nodes = vec![rendered("a", "1"), rendered("b", ""), rendered("c", "a + 1")];
        assert_eq!(emit(&Squiggle, &nodes), "a = 1 // A\nc = a + 1 // C");
    }

    #[test]
    fn test_empty_input_emits_nothing() {
        assert_eq!(emit(&Squiggle, &Vec::<RenderedNode>::new()), "");
    }
}
