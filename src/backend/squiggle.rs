use super::{samples_literal, Backend};
use crate::store::RenderedNode;

/// Emits a Squiggle script: one assignment per line, distributions as native literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Squiggle;

impl Backend for Squiggle {
    fn header(&self, url: &str) -> String {
        format!("// Generated from {}\n", url)
    }

    fn point(&self, value: &str) -> String {
        value.to_string()
    }

    fn data(&self, samples: &[f64]) -> String {
        format!("fromSamples({})", samples_literal(samples))
    }

    fn uniform(&self, low: &str, high: &str) -> String {
        format!("uniform({}, {})", low, high)
    }

    // Squiggle's `to` builds a lognormal; normals reuse it until there is a
    // dedicated constructor in the generated runtime.
    fn normal(&self, low: &str, high: &str) -> String {
        format!("{} to {}", low, high)
    }

    fn lognormal(&self, low: &str, high: &str) -> String {
        format!("{} to {}", low, high)
    }

    fn function(&self, body: &str) -> String {
        body.to_string()
    }

    fn render_assignment(&self, node: &RenderedNode) -> String {
        format!("{} = {} // {}", node.name, node.code, node.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GuessKind;

    #[test]
    fn test_kind_renderers() {
        let b = Squiggle;
        assert_eq!(b.point("5"), "5");
        assert_eq!(b.data(&[1.0, 2.0, 3.5]), "fromSamples([1,2,3.5])");
        assert_eq!(b.uniform("10", "20"), "uniform(10, 20)");
        assert_eq!(b.normal("3", "9"), "3 to 9");
        assert_eq!(b.lognormal("3", "9"), b.normal("3", "9"));
        assert_eq!(b.function("x + 1"), "x + 1");
    }

    #[test]
    fn test_assignment_documents_label() {
        let node = RenderedNode {
            id: "m1".into(),
            name: "revenue".into(),
            label: "Revenue".into(),
            kind: GuessKind::Point,
            code: "5".into(),
        };
        assert_eq!(Squiggle.render_assignment(&node), "revenue = 5 // Revenue");
        assert_eq!(Squiggle.header("https://x.test/m/1"), "// Generated from https://x.test/m/1\n");
    }
}
