//! Render steps and the per-mode plans built from them.
//!
//! A plan is a fixed, ordered list of steps. Earlier steps print first, so
//! `[ShowFullHttp, ShowErrorLine, InvokeCallback]` shows the response, then
//! the error, then the caller's own output.

use super::mode::DisplayMode;

/// One display action in a render plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStep {
    /// Status table, header table and pretty-printed body.
    ShowFullHttp,
    /// `HTTP Response:` status line and pretty-printed body.
    ShowSummaryHttp,
    /// `HTTP Response:` status line and the body's embedded message, if any.
    ShowEmbeddedMessage,
    /// `Error: <message>` when an error is present.
    ShowErrorLine,
    /// The caller's callback.
    InvokeCallback,
}

impl RenderStep {
    /// True for steps that read the response body.
    pub fn consumes_body(&self) -> bool {
        matches!(
            self,
            RenderStep::ShowFullHttp | RenderStep::ShowSummaryHttp | RenderStep::ShowEmbeddedMessage
        )
    }
}

/// What a render call will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Print the re-indented body only.
    RawJson,
    /// Run these steps in order.
    Steps(Vec<RenderStep>),
}

impl Plan {
    /// Builds the plan for a resolved display mode.
    pub fn for_mode(mode: DisplayMode, has_error: bool) -> Self {
        use RenderStep::*;

        match mode {
            DisplayMode::Debug => Plan::Steps(vec![ShowFullHttp, ShowErrorLine, InvokeCallback]),
            DisplayMode::Verbose => {
                Plan::Steps(vec![ShowSummaryHttp, ShowErrorLine, InvokeCallback])
            }
            DisplayMode::JsonOnly => Plan::RawJson,
            DisplayMode::Default if has_error => {
                Plan::Steps(vec![ShowEmbeddedMessage, ShowErrorLine, InvokeCallback])
            }
            DisplayMode::Default => Plan::Steps(vec![ShowErrorLine, InvokeCallback]),
        }
    }

    /// Builds the plan for a response/error pair with no domain object.
    ///
    /// Debug and verbose flags do not matter here: unless JSON-only applies,
    /// the full HTTP detail is always shown.
    pub fn for_http_display(json_only: bool, has_response: bool) -> Self {
        if json_only && has_response {
            Plan::RawJson
        } else {
            Plan::Steps(vec![
                RenderStep::ShowFullHttp,
                RenderStep::ShowErrorLine,
                RenderStep::InvokeCallback,
            ])
        }
    }

    /// Number of steps that read the response body.
    pub fn body_readers(&self) -> usize {
        match self {
            Plan::RawJson => 1,
            Plan::Steps(steps) => steps.iter().filter(|s| s.consumes_body()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RenderStep::*;

    #[test]
    fn test_debug_plan() {
        for has_error in [false, true] {
            assert_eq!(
                Plan::for_mode(DisplayMode::Debug, has_error),
                Plan::Steps(vec![ShowFullHttp, ShowErrorLine, InvokeCallback])
            );
        }
    }

    #[test]
    fn test_verbose_plan() {
        assert_eq!(
            Plan::for_mode(DisplayMode::Verbose, true),
            Plan::Steps(vec![ShowSummaryHttp, ShowErrorLine, InvokeCallback])
        );
    }

    #[test]
    fn test_json_only_plan_skips_callback() {
        assert_eq!(Plan::for_mode(DisplayMode::JsonOnly, false), Plan::RawJson);
    }

    #[test]
    fn test_default_plans() {
        assert_eq!(
            Plan::for_mode(DisplayMode::Default, false),
            Plan::Steps(vec![ShowErrorLine, InvokeCallback])
        );
        assert_eq!(
            Plan::for_mode(DisplayMode::Default, true),
            Plan::Steps(vec![ShowEmbeddedMessage, ShowErrorLine, InvokeCallback])
        );
    }

    #[test]
    fn test_http_display_plan() {
        assert_eq!(Plan::for_http_display(true, true), Plan::RawJson);
        assert_eq!(
            Plan::for_http_display(true, false),
            Plan::Steps(vec![ShowFullHttp, ShowErrorLine, InvokeCallback])
        );
        assert_eq!(
            Plan::for_http_display(false, true),
            Plan::Steps(vec![ShowFullHttp, ShowErrorLine, InvokeCallback])
        );
    }

    #[test]
    fn test_every_plan_reads_body_at_most_once() {
        let modes = [
            DisplayMode::Debug,
            DisplayMode::Verbose,
            DisplayMode::JsonOnly,
            DisplayMode::Default,
        ];
        for mode in modes {
            for has_error in [false, true] {
                assert!(Plan::for_mode(mode, has_error).body_readers() <= 1);
            }
        }
        for json_only in [false, true] {
            assert!(Plan::for_http_display(json_only, true).body_readers() <= 1);
        }
    }
}
