//! Shared page chrome

use crate::auth::Identity;
use crate::guard::{route_for, Page};

/// Escape text for inclusion in HTML content or attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a page body in the document skeleton
pub fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - VivaCore</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="min-h-screen bg-gradient-to-br from-slate-50 via-white to-red-50 text-slate-900">
{}
</body>
</html>
"#,
        escape(title),
        body
    )
}

/// Header with the signed-in user, then the page title and content
pub fn layout(identity: &Identity, title: &str, content: &str) -> String {
    let profile = route_for(Page::Profile).path;
    let settings = route_for(Page::Settings).path;

    let body = format!(
        r#"
    <header class="bg-white/95 border-b border-red-100 shadow-lg sticky top-0 z-50">
        <div class="max-w-7xl mx-auto px-4 flex justify-between items-center h-20">
            <a href="{home}" class="flex items-center space-x-4">
                <div class="w-14 h-14 bg-gradient-to-br from-red-500 to-red-600 rounded-2xl flex items-center justify-center text-white text-2xl">&#9829;</div>
                <div>
                    <h1 class="text-2xl font-bold text-red-700">VivaCore</h1>
                    <p class="text-sm text-slate-600">Sistema de Pesquisa Cardíaca</p>
                </div>
            </a>
            <div class="flex items-center space-x-4">
                <div class="w-10 h-10 rounded-full bg-red-100 text-red-700 font-bold flex items-center justify-center" data-testid="initials">{initials}</div>
                <div class="text-left">
                    <p class="text-sm font-semibold" data-testid="user-name">{name}</p>
                    <p class="text-xs text-slate-500" data-testid="user-role">{role}</p>
                </div>
                <nav class="flex items-center space-x-2 text-sm">
                    <a href="{profile}" class="px-3 py-2 rounded hover:bg-red-50">Perfil</a>
                    <a href="{settings}" class="px-3 py-2 rounded hover:bg-red-50">Configurações</a>
                    <form method="post" action="/logout">
                        <button type="submit" class="px-3 py-2 rounded text-red-600 hover:bg-red-50">Sair</button>
                    </form>
                </nav>
            </div>
        </div>
    </header>

    <main class="max-w-7xl mx-auto px-4 py-8">
        <div class="mb-10">
            <h2 class="text-4xl font-bold tracking-tight">{title}</h2>
            <div class="h-1 w-32 mt-4 bg-gradient-to-r from-red-500 to-red-600 rounded-full"></div>
        </div>
        <div class="space-y-8">
{content}
        </div>
    </main>
"#,
        home = identity.home_path(),
        initials = escape(&identity.initials()),
        name = escape(&identity.name),
        role = identity.role.label(),
        profile = profile,
        settings = settings,
        title = escape(title),
        content = content,
    );

    document(title, &body)
}
