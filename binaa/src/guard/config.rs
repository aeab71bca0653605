/// Folders served from the public directory, matched exactly or as a prefix
pub(super) const PUBLIC_FOLDERS: [&str; 3] = ["/images", "/logos", "/content"];

/// Files served from the root of the public directory
pub(super) const PUBLIC_FILES: [&str; 10] = [
    "/favicon.ico",
    "/robots.txt",
    "/sitemap.xml",
    "/manifest.json",
    "/manifest.en.json",
    "/manifest.ar.json",
    "/logo.png",
    "/white-logo.png",
    "/web-app-manifest-512x512.png",
    "/web-app-manifest-192x192.png",
];

/// Prefixes that never go through locale or session handling
pub(super) const BYPASS_PREFIXES: [&str; 2] = ["/_next/", "/api/"];

/// Locale-relative routes that need any signed-in account
pub(super) const ADMIN_ROUTES: [&str; 1] = ["/dashboard"];

/// Locale-relative routes restricted to super admins
pub(super) const SUPER_ADMIN_ROUTES: [&str; 1] = ["/dashboard/users"];
