//! # mp-cli
//!
//! The `mp` command-line tool. Argument parsing lives here; the rules
//! themselves live in `mp-validate`.
//!
//! ```bash
//! # Validate every playbook and integration under the content root:
//! mp validate content/
//!
//! # Validate two units against a pull request, JSON report on stdout:
//! GITHUB_PR_SHA=abc123 mp validate --json content/playbooks/triage content/response_integrations/mail_relay
//! ```

pub mod validate;
