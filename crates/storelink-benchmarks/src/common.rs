//! Common utilities for benchmarks

use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(2))
        .measurement_time(Duration::from_secs(5))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// File name suffixes seen on real listing pages
const SUFFIXES: &[&str] = &[
    "_x64__8wekyb3d8bbwe.msixbundle",
    "_arm64__8wekyb3d8bbwe.msix",
    "_x86__8wekyb3d8bbwe.appx",
    "_neutral__8wekyb3d8bbwe.blockmap",
    "_x64__8wekyb3d8bbwe.emsixbundle",
    "_neutral_~_8wekyb3d8bbwe.xml",
];

/// Build a listing page with `rows` download links in a table
pub fn listing_html(rows: usize) -> String {
    let mut html = String::from("<html><body><table class=\"tftable\">\n");
    for i in 0..rows {
        let suffix = SUFFIXES[i % SUFFIXES.len()];
        html.push_str(&format!(
            "<tr><td><a href=\"http://tlu.dl.delivery.mp.microsoft.com/filestreamingservice/files/{i:08x}?P1=1&amp;P2=404\" rel=\"noreferrer\">Contoso.App_1.{i}.0.0{suffix}</a></td><td>sha1-{i}</td><td>{i} MB</td></tr>\n"
        ));
    }
    html.push_str("</table></body></html>\n");
    html
}
