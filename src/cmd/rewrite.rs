//! `docgate rewrite`: run the request rewriter once from the shell.
//!
//! Prints the URL the viewer would dispatch for `url` when the page is
//! served from `--host`. The host may be given as shown in the address
//! bar (`localhost:8082`); only the hostname is used. Malformed absolute
//! URLs are reported as errors.

use crate::cli::RewriteArgs;
use crate::error::DocgateError;
use crate::rewrite::host::normalize_host;
use crate::rewrite::{apply, RequestDescriptor, Rewrite, TRIGGER};

pub fn execute(args: &RewriteArgs) -> Result<(), DocgateError> {
    let outcome = rewrite(args)?;
    let redirected = outcome.is_redirected();

    println!("{}", outcome.into_descriptor().url);
    if !redirected {
        eprintln!("no '{TRIGGER}' in path or query, url left unchanged");
    }
    Ok(())
}

fn rewrite(args: &RewriteArgs) -> Result<Rewrite, DocgateError> {
    let host =
        normalize_host(&args.host).ok_or_else(|| DocgateError::InvalidHost(args.host.clone()))?;
    Ok(apply(&RequestDescriptor::new(args.url.as_str()), &host)?)
}
