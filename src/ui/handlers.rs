//! Web UI handlers

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};

use super::layout::{document, escape, layout};
use crate::api::server::{sign_in, SharedState};
use crate::auth::{Credentials, GuardedRoute, Identity, Role};
use crate::error::Error;
use crate::guard::{route_for, Page, RouteDef};

/// Any page that requires a session
pub async fn page(
    Extension(GuardedRoute(route)): Extension<GuardedRoute>,
    Extension(identity): Extension<Identity>,
) -> Html<String> {
    let content = match route.page {
        Page::PatientDashboard => patient_dashboard(&identity),
        Page::ResearcherDashboard => researcher_dashboard(&identity),
        Page::Profile => profile(&identity),
        Page::Settings => settings(&identity),
        Page::Consultations => section(
            &identity,
            "Acompanhe suas consultas agendadas e o histórico de atendimentos.",
        ),
        Page::Medications => section(
            &identity,
            "Veja os medicamentos prescritos e registre suas doses.",
        ),
        Page::CurrentStage => section(
            &identity,
            "Confira a etapa atual do seu tratamento e os próximos passos.",
        ),
        Page::PatientsMonitoring => section(
            &identity,
            "Acompanhe os pacientes vinculados às suas pesquisas.",
        ),
        Page::RegisterResearch => section(
            &identity,
            "Cadastre uma nova pesquisa e vincule pacientes a ela.",
        ),
        // The guard never admits these here
        Page::Root | Page::Login => String::new(),
    };

    Html(layout(&identity, route.title, &content))
}

/// Requests that matched no router path
///
/// The guard already redirected unknown paths, so an admitted request is a
/// known route spelled differently (e.g. with a trailing slash).
pub async fn fallback(req: Request) -> Redirect {
    match req.extensions().get::<GuardedRoute>() {
        Some(GuardedRoute(route)) => Redirect::to(route.path),
        None => Redirect::to("/"),
    }
}

pub async fn login_page() -> Html<String> {
    Html(login_form(None, "", Role::Patient))
}

pub async fn login_submit(
    State(state): State<SharedState>,
    Form(credentials): Form<Credentials>,
) -> Result<Response, Error> {
    if !credentials.is_complete() {
        let html = login_form(
            Some(("Campos obrigatórios", "Por favor, preencha todos os campos.")),
            &credentials.email,
            credentials.role,
        );
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
    }

    if sign_in(&state, &credentials).await? {
        return Ok(Redirect::to(credentials.role.home_path()).into_response());
    }

    let html = login_form(
        Some(("Erro no login", "Verifique suas credenciais e tente novamente.")),
        &credentials.email,
        credentials.role,
    );
    Ok((StatusCode::UNAUTHORIZED, Html(html)).into_response())
}

fn login_form(notice: Option<(&str, &str)>, email: &str, role: Role) -> String {
    let notice_html = notice
        .map(|(title, description)| {
            format!(
                r#"<div class="mb-4 rounded border border-red-300 bg-red-50 p-3 text-sm text-red-700" role="alert"><strong>{}</strong> {}</div>"#,
                escape(title),
                escape(description)
            )
        })
        .unwrap_or_default();

    let role_options: String = Role::ALL
        .iter()
        .map(|r| {
            format!(
                r#"<label class="flex-1 text-center"><input type="radio" name="role" value="{}"{}> {}</label>"#,
                r,
                if *r == role { " checked" } else { "" },
                r.label()
            )
        })
        .collect();

    let body = format!(
        r#"
    <div class="min-h-screen flex items-center justify-center p-4">
        <div class="w-full max-w-md">
            <div class="text-center mb-8">
                <h1 class="text-3xl font-bold mb-2">VivaCore</h1>
                <p class="text-gray-600">Sistema de Pesquisa Cardíaca</p>
            </div>
            <div class="bg-white/80 rounded-lg shadow-lg p-6">
                <h2 class="text-2xl text-center mb-1">Entrar</h2>
                <p class="text-center text-gray-500 mb-6">Acesse sua conta para continuar</p>
                {notice}
                <form method="post" action="{action}" class="space-y-4">
                    <div class="flex space-x-2 mb-2">{roles}</div>
                    <input type="email" name="email" value="{email}" placeholder="seu@email.com" class="w-full px-3 py-2 border rounded">
                    <input type="password" name="password" placeholder="Sua senha" class="w-full px-3 py-2 border rounded">
                    <button type="submit" class="w-full py-2 rounded bg-blue-600 hover:bg-blue-700 text-white">Entrar</button>
                </form>
                <div class="mt-6 text-center text-sm text-gray-600">
                    <p>Credenciais de teste:</p>
                    <p>Email: qualquer@email.com | Senha: qualquer</p>
                </div>
            </div>
        </div>
    </div>
"#,
        notice = notice_html,
        action = route_for(Page::Login).path,
        roles = role_options,
        email = escape(email),
    );

    document(route_for(Page::Login).title, &body)
}

fn card(route: &RouteDef, description: &str) -> String {
    format!(
        r#"<a href="{}" class="block p-6 rounded-xl bg-white shadow hover:shadow-lg"><h3 class="text-lg font-semibold mb-2">{}</h3><p class="text-sm text-slate-600">{}</p></a>"#,
        route.path,
        escape(route.title),
        escape(description)
    )
}

fn patient_dashboard(identity: &Identity) -> String {
    format!(
        r#"            <p class="text-lg">Olá, {}!</p>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">{}{}{}</div>"#,
        escape(&identity.name),
        card(route_for(Page::Consultations), "Suas consultas agendadas"),
        card(route_for(Page::Medications), "Medicamentos e horários"),
        card(route_for(Page::CurrentStage), "Progresso do tratamento"),
    )
}

fn researcher_dashboard(identity: &Identity) -> String {
    format!(
        r#"            <p class="text-lg">Olá, {}!</p>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">{}{}<a href="/researcher/reports" class="block p-6 rounded-xl bg-white shadow hover:shadow-lg"><h3 class="text-lg font-semibold mb-2">Relatórios</h3><p class="text-sm text-slate-600">Análises e resultados</p></a></div>"#,
        escape(&identity.name),
        card(route_for(Page::PatientsMonitoring), "Pacientes em acompanhamento"),
        card(route_for(Page::RegisterResearch), "Nova pesquisa"),
    )
}

fn profile(identity: &Identity) -> String {
    format!(
        r#"            <dl class="grid grid-cols-2 gap-4 bg-white rounded-xl shadow p-6">
                <dt class="font-semibold">Nome</dt><dd>{}</dd>
                <dt class="font-semibold">Email</dt><dd>{}</dd>
                <dt class="font-semibold">Perfil</dt><dd>{}</dd>
                <dt class="font-semibold">Identificador</dt><dd>{}</dd>
            </dl>
            {}"#,
        escape(&identity.name),
        escape(&identity.email),
        identity.role.label(),
        escape(&identity.id),
        back_link(identity),
    )
}

fn settings(identity: &Identity) -> String {
    format!(
        r#"            <div class="bg-white rounded-xl shadow p-6">
                <h3 class="text-lg font-semibold mb-2">Preferências da conta</h3>
                <p class="text-sm text-slate-600">Notificações são enviadas para {}.</p>
            </div>
            {}"#,
        escape(&identity.email),
        back_link(identity),
    )
}

fn section(identity: &Identity, description: &str) -> String {
    format!(
        r#"            <p class="text-slate-600">{}</p>
            {}"#,
        escape(description),
        back_link(identity),
    )
}

fn back_link(identity: &Identity) -> String {
    format!(
        r#"<a href="{}" class="inline-block text-red-600 hover:underline">&larr; Voltar ao Painel</a>"#,
        identity.home_path()
    )
}
