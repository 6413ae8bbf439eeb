//! ES module renderer with typed context
//!
//! Imports target the compiled `.js` output of each module, the way
//! TypeScript resolves ES module specifiers.

use super::program::ChainProgram;
use super::template::Template;

const ENTRY_POINT: Template = Template::new(
    r#"import { Context } from 'aws-lambda';
{{imports}}

type MiddlewareContext<TResult = any> = Context & {
  end: () => void;
  prev: TResult;
};

type Handler<TEvent = any, TResult = any> = (
  event: TEvent,
  context: MiddlewareContext,
) => Promise<TResult>;

export const handler: Handler = async (event, context) => {
  let stopped = false;
  context.end = () => {
    stopped = true;
  };

  const onSuccess = (invoke: () => any) => (prev: any): any => {
    if (stopped) return prev;
    context.prev = prev;
    return invoke();
  };

  const onFailure = (invoke: () => any) => (error: any): any => {
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
        .map(|import| format!("import * as {} from {};", import.binding, import.literal(".js")))
        .collect::<Vec<_>>()
        .join("\n");

    ENTRY_POINT.render(&[("imports", &imports), ("chain", &program.render_chain())])
}
