//! Built-in tool catalog.
//!
//! The curated list of developer tools checked by default. Order matters:
//! it is the order tools are probed and reported in.

use super::descriptor::{InstallSpec, InstallType, Platform, ToolDescriptor};

/// Definition of a built-in tool.
struct BuiltinTool {
    name: &'static str,
    command: &'static str,
    category: &'static str,
    description: &'static str,
    package: &'static str,
    install_type: InstallType,
    critical: bool,
    platforms: &'static [Platform],
    size: Option<&'static str>,
}

const EVERYWHERE: &[Platform] = &[Platform::Windows, Platform::MacOS, Platform::Linux];
const UNIX_ONLY: &[Platform] = &[Platform::MacOS, Platform::Linux];

macro_rules! tool {
    ($name:expr, $cmd:expr, $cat:expr, $desc:expr, $pkg:expr, $kind:ident, $critical:expr, $platforms:expr, $size:expr) => {
        BuiltinTool {
            name: $name,
            command: $cmd,
            category: $cat,
            description: $desc,
            package: $pkg,
            install_type: InstallType::$kind,
            critical: $critical,
            platforms: $platforms,
            size: $size,
        }
    };
}

const BUILTIN_TOOLS: &[BuiltinTool] = &[
    // Package managers
    tool!("ni", "ni --version", "Package Managers", "Universal package manager detector", "@antfu/ni", Npm, true, EVERYWHERE, Some("2.1MB")),
    tool!("bun", "bun --version", "Package Managers", "Fast JavaScript runtime and package manager", "bun", Curl, false, EVERYWHERE, None),
    tool!("pnpm", "pnpm --version", "Package Managers", "Efficient package manager", "pnpm", Npm, false, EVERYWHERE, None),
    tool!("yarn", "yarn --version", "Package Managers", "Modern package manager", "yarn", Npm, false, EVERYWHERE, None),
    tool!("volta", "volta --version", "Package Managers", "Node version manager", "volta", Curl, false, EVERYWHERE, None),
    // File and directory operations
    tool!("rimraf", "rimraf --version", "File Operations", "Cross-platform rm -rf", "rimraf", Npm, true, EVERYWHERE, Some("890KB")),
    tool!("trash", "trash --version", "File Operations", "Safe delete to trash", "trash-cli", Npm, false, EVERYWHERE, Some("1.1MB")),
    tool!("fd", "fd --version", "File Operations", "Fast alternative to find", "fd-find", System, false, EVERYWHERE, None),
    tool!("rg", "rg --version", "File Operations", "Ultra-fast grep (ripgrep)", "ripgrep", System, false, EVERYWHERE, None),
    // Development servers
    tool!("serve", "serve --version", "Development Servers", "Static file server", "serve", Npm, true, EVERYWHERE, Some("1.5MB")),
    tool!("nodemon", "nodemon --version", "Development Servers", "Auto-restart Node.js apps", "nodemon", Npm, true, EVERYWHERE, Some("3.2MB")),
    tool!("live-server", "live-server --version", "Development Servers", "Auto-reload dev server", "live-server", Npm, false, EVERYWHERE, None),
    tool!("json-server", "json-server --version", "Development Servers", "Mock REST API", "json-server", Npm, false, EVERYWHERE, Some("8.9MB")),
    // Process management
    tool!("pm2", "pm2 --version", "Process Management", "Production process manager", "pm2", Npm, false, EVERYWHERE, Some("18.7MB")),
    tool!("fkill", "fkill --version", "Process Management", "Interactive process killer", "fkill-cli", Npm, false, EVERYWHERE, Some("4.2MB")),
    tool!("concurrently", "concurrently --version", "Process Management", "Run multiple commands", "concurrently", Npm, false, EVERYWHERE, Some("2.8MB")),
    tool!("kill-port", "kill-port --version", "Process Management", "Kill process on port", "kill-port", Npm, false, EVERYWHERE, Some("1.3MB")),
    // Code quality
    tool!("prettier", "prettier --version", "Code Quality", "Code formatter", "prettier", Npm, true, EVERYWHERE, Some("8.7MB")),
    tool!("eslint", "eslint --version", "Code Quality", "JavaScript linter", "eslint", Npm, false, EVERYWHERE, Some("12.3MB")),
    tool!("eslint_d", "eslint_d --version", "Code Quality", "ESLint daemon (faster)", "eslint_d", Npm, false, EVERYWHERE, Some("890KB")),
    tool!("stylelint", "stylelint --version", "Code Quality", "CSS linter", "stylelint", Npm, false, EVERYWHERE, Some("15.6MB")),
    // Build tools
    tool!("esbuild", "esbuild --version", "Build Tools", "Extremely fast bundler", "esbuild", Npm, false, EVERYWHERE, Some("7.2MB")),
    tool!("vite", "vite --version", "Build Tools", "Lightning-fast dev server", "vite", Npm, false, EVERYWHERE, Some("45.8MB")),
    tool!("turbo", "turbo --version", "Build Tools", "High-performance build system", "turbo", Npm, false, EVERYWHERE, Some("23.1MB")),
    tool!("rollup", "rollup --version", "Build Tools", "Module bundler", "rollup", Npm, false, EVERYWHERE, Some("6.8MB")),
    // Testing
    tool!("vitest", "vitest --version", "Testing", "Blazing fast unit tests", "vitest", Npm, false, EVERYWHERE, Some("12.5MB")),
    tool!("jest", "jest --version", "Testing", "JavaScript testing framework", "jest", Npm, false, EVERYWHERE, Some("31.2MB")),
    tool!("playwright", "playwright --version", "Testing", "End-to-end testing", "@playwright/test", Npm, false, EVERYWHERE, Some("78.9MB")),
    tool!("lighthouse", "lighthouse --version", "Testing", "Performance auditing", "lighthouse", Npm, false, EVERYWHERE, Some("28.4MB")),
    // System tools
    tool!("bat", "bat --version", "System Tools", "Better cat with syntax highlighting", "bat", System, false, EVERYWHERE, None),
    tool!("fzf", "fzf --version", "System Tools", "Fuzzy finder", "fzf", System, false, EVERYWHERE, None),
    tool!("jq", "jq --version", "System Tools", "JSON processor", "jq", System, false, EVERYWHERE, None),
    tool!("tree", "tree --version", "System Tools", "Directory structure visualization", "tree", System, false, EVERYWHERE, None),
    // Productivity and git
    tool!("tldr", "tldr --version", "Productivity", "Simplified man pages", "tldr", Npm, false, EVERYWHERE, Some("5.1MB")),
    tool!("gh", "gh --version", "Git Tools", "GitHub CLI", "gh", System, false, EVERYWHERE, None),
    // Network
    tool!("speed-test", "speed-test --version", "Network Tools", "Internet speed test", "speed-test", Npm, false, EVERYWHERE, Some("3.7MB")),
    tool!("fast-cli", "fast --version", "Network Tools", "Netflix speed test", "fast-cli", Npm, false, EVERYWHERE, Some("1.9MB")),
    // Fun
    tool!("neofetch", "neofetch --version", "Fun Tools", "System info display", "neofetch", System, false, UNIX_ONLY, None),
    tool!("figlet", "figlet -v", "Fun Tools", "ASCII art banners", "figlet", System, false, EVERYWHERE, None),
];

/// Build the built-in catalog in its canonical order.
pub fn builtin_tools() -> Vec<ToolDescriptor> {
    BUILTIN_TOOLS.iter().map(to_descriptor).collect()
}

fn to_descriptor(def: &BuiltinTool) -> ToolDescriptor {
    ToolDescriptor {
        name: def.name.to_string(),
        probe_command: def.command.to_string(),
        category: def.category.to_string(),
        description: def.description.to_string(),
        package_name: def.package.to_string(),
        install_type: def.install_type,
        platforms: def.platforms.to_vec(),
        critical: def.critical,
        install: install_spec(def, Platform::current()),
    }
}

/// Automatic install recipe for a built-in tool on a platform.
///
/// npm packages install everywhere. Curl tools use their vendor script.
/// System packages are left to the user's package manager and only show up
/// as suggestions.
fn install_spec(def: &BuiltinTool, platform: Platform) -> Option<InstallSpec> {
    let command = match def.install_type {
        InstallType::Npm => format!("npm install -g {}", def.package),
        InstallType::Curl => curl_install_command(def.name, platform)?.to_string(),
        InstallType::System => return None,
    };

    Some(InstallSpec {
        command,
        verify: def.command.to_string(),
        size: def.size.map(str::to_string),
        max_retries: None,
    })
}

/// Vendor install script for a curl-installed tool.
pub fn curl_install_command(name: &str, platform: Platform) -> Option<&'static str> {
    match (name, platform) {
        ("bun", Platform::Windows) => Some("powershell -c \"irm bun.sh/install.ps1 | iex\""),
        ("bun", _) => Some("curl -fsSL https://bun.sh/install | bash"),
        ("volta", Platform::Windows) => None,
        ("volta", _) => Some("curl https://get.volta.sh | bash"),
        _ => None,
    }
}
