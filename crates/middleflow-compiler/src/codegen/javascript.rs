//! CommonJS renderer

use super::program::ChainProgram;
use super::template::Template;

const ENTRY_POINT: Template = Template::new(
    r#"'use strict';

{{imports}}

module.exports.handler = async (event, context) => {
  let stopped = false;
  context.end = () => {
    stopped = true;
  };

  const onSuccess = (invoke) => (prev) => {
    if (stopped) return prev;
    context.prev = prev;
    return invoke();
  };

  const onFailure = (invoke) => (error) => {
    if (stopped) throw error;
    context.prev = error;
    return invoke();
  };

  return Promise.resolve(){{chain}};
};
"#,
);

pub(super) fn render(program: &ChainProgram) -> String {
    let imports = program
        .imports
        .iter()
        .map(|import| format!("const {} = require({});", import.binding, import.literal("")))
        .collect::<Vec<_>>()
        .join("\n");

    ENTRY_POINT.render(&[("imports", &imports), ("chain", &program.render_chain())])
}
