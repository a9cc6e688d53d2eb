//! Constants for source discovery and import resolution.
//!
//! ## Source Extensions
//!
//! - **TypeScript**: `.ts`, `.tsx`, `.mts` (ES module), `.cts` (CommonJS)
//! - **JavaScript**: `.js`, `.jsx`, `.mjs` (ES module), `.cjs` (CommonJS)
//! - **Single-file components**: `.vue`, `.svelte` (only `<script>` blocks are parsed)

/// File extensions scanned for imports when none are configured
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "ts",     // TypeScript
    "tsx",    // TypeScript with JSX
    "mts",    // TypeScript module
    "cts",    // TypeScript CommonJS
    "js",     // JavaScript
    "jsx",    // JavaScript with JSX
    "mjs",    // JavaScript module
    "cjs",    // JavaScript CommonJS
    "vue",    // Vue single-file component
    "svelte", // Svelte component
];

/// Extensions whose files embed scripts inside markup
pub const COMPONENT_EXTENSIONS: &[&str] = &["vue", "svelte"];

/// Directory names never descended into during discovery
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", "dist", "build", "coverage", ".git"];

/// Directory holding installed packages, relative to the project root
pub const INSTALL_DIR: &str = "node_modules";

/// Manifest file name, both for the project and for each installed package
pub const MANIFEST_FILE: &str = "package.json";

/// Published name of this tool; never reported as used or unused
pub const SELF_PACKAGE_NAME: &str = "dependency-analyzer";

/// Scheme prefix that marks an import as a runtime built-in
pub const BUILTIN_SCHEME: &str = "node:";

/// Node.js built-in module names (`require('module').builtinModules`)
pub const BUILTIN_MODULES: &[&str] = &[
    "_http_agent",
    "_http_client",
    "_http_common",
    "_http_incoming",
    "_http_outgoing",
    "_http_server",
    "_stream_duplex",
    "_stream_passthrough",
    "_stream_readable",
    "_stream_transform",
    "_stream_wrap",
    "_stream_writable",
    "_tls_common",
    "_tls_wrap",
    "assert",
    "assert/strict",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "dns/promises",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "inspector/promises",
    "module",
    "net",
    "os",
    "path",
    "path/posix",
    "path/win32",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "readline/promises",
    "repl",
    "stream",
    "stream/consumers",
    "stream/promises",
    "stream/web",
    "string_decoder",
    "sys",
    "timers",
    "timers/promises",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "util/types",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];
