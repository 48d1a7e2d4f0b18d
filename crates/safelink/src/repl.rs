//! Interactive console
//!
//! A reedline REPL over the contact list: pagination, search, detail
//! editing, photo upload, and the new-contact form. Screen state lives in
//! the sl-app view-models; this module only renders and dispatches.

use std::io::{IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;

use nu_ansi_term::{Color, Style};
use reedline::{
    ColumnarMenu, Completer, DefaultHinter, Emacs, KeyCode, KeyModifiers, Keybindings,
    MenuBuilder, Prompt, Reedline, ReedlineEvent, ReedlineMenu, Signal, Suggestion,
};
use sl_app::{AppError, ContactForm, DetailView, ListState, ListView};
use sl_contacts::ContactStore;
use sl_core::{Config, Notifier, NotifyConfig, NotifyLevel};
use tracing::info;

/// Available commands for autocomplete display
const COMMANDS: &[(&str, &str)] = &[
    ("/help", "Show this command list"),
    ("/list", "Show the contact list"),
    ("/refresh", "Re-fetch the current page"),
    ("/page", "Go to a page, e.g. /page 2"),
    ("/next", "Next page"),
    ("/prev", "Previous page"),
    ("/search", "Filter the page by name, e.g. /search ann"),
    ("/show", "Open a contact, e.g. /show <id>"),
    ("/set", "Edit a field, e.g. /set phone 1234567890"),
    ("/save", "Save the open contact"),
    ("/photo", "Upload a photo, e.g. /photo ./ann.png"),
    ("/back", "Return to the contact list"),
    ("/new", "Open the new-contact form"),
    ("/submit", "Create the drafted contact"),
    ("/cancel", "Discard the draft"),
    ("/exit", "Quit"),
    ("/quit", "Quit"),
];

/// Command completer for reedline
#[derive(Clone)]
pub struct CommandCompleter {
    commands: Vec<(&'static str, &'static str)>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.to_vec(),
        }
    }
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for CommandCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        if !line.starts_with('/') {
            return Vec::new();
        }

        self.commands
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(line))
            .map(|(cmd, desc)| Suggestion {
                value: cmd.to_string(),
                description: Some(desc.to_string()),
                extra: None,
                span: reedline::Span::new(0, pos),
                append_whitespace: true,
                style: None,
            })
            .collect()
    }
}

/// Custom prompt with colored styling
struct ColoredPrompt {
    style: Style,
}

impl ColoredPrompt {
    fn new() -> Self {
        Self {
            style: Color::Cyan.bold(),
        }
    }
}

impl Prompt for ColoredPrompt {
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Owned(self.style.paint("safelink> ").to_string())
    }

    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_indicator(
        &self,
        _prompt_mode: reedline::PromptEditMode,
    ) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: reedline::PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }
}

/// Terminal notification sink.
///
/// Info messages behave like toasts: shown for the configured duration,
/// then erased. Success, warning, and error lines persist in scrollback.
pub struct ConsoleNotifier {
    config: NotifyConfig,
}

impl ConsoleNotifier {
    pub fn new(config: NotifyConfig) -> Self {
        Self { config }
    }

    fn styled(level: NotifyLevel, message: &str) -> String {
        let color = match level {
            NotifyLevel::Info => Color::Cyan,
            NotifyLevel::Success => Color::Green,
            NotifyLevel::Warning => Color::Yellow,
            NotifyLevel::Error => Color::Red,
        };
        format!(
            "{} {}",
            color.bold().paint(format!("[{}]", level.label())),
            message
        )
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        let line = Self::styled(level, message);

        let transient = level == NotifyLevel::Info
            && self.config.duration_ms > 0
            && std::io::stdout().is_terminal();

        if transient {
            print!("{}", line);
            let _ = std::io::stdout().flush();
            std::thread::sleep(std::time::Duration::from_millis(self.config.duration_ms));
            print!("\r\x1b[2K");
            let _ = std::io::stdout().flush();
        } else {
            println!("{}", line);
        }
    }
}

/// Which screen is on display
enum Screen {
    List,
    Detail(DetailView),
}

/// Whether the loop keeps running after a command
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Console application state
struct Repl {
    store: Arc<dyn ContactStore>,
    list: ListView,
    screen: Screen,
    draft: Option<ContactForm>,
    notifier: ConsoleNotifier,
}

impl Repl {
    fn new(store: Arc<dyn ContactStore>, page_size: u32, notifier: ConsoleNotifier) -> Self {
        let list = ListView::new(Arc::clone(&store), page_size);
        Self {
            store,
            list,
            screen: Screen::List,
            draft: None,
            notifier,
        }
    }

    fn render(&self) {
        if let Some(form) = &self.draft {
            println!("{}", render_draft(form));
            return;
        }
        match &self.screen {
            Screen::List => println!("{}", render_list(&self.list)),
            Screen::Detail(view) => println!("{}", render_detail(view)),
        }
    }

    fn surface(&self, err: &AppError) {
        self.notifier.error(&err.to_string());
    }

    async fn handle(&mut self, input: &str) -> Flow {
        if !input.starts_with('/') {
            return self.handle_plain(input);
        }

        let (command, args) = split_command(input);
        match command {
            "/exit" | "/quit" | "/q" => return Flow::Exit,
            "/help" | "/?" => print_commands(),
            "/list" | "/back" => {
                self.screen = Screen::List;
                self.render();
            }
            "/refresh" => {
                match self.list.refresh().await {
                    Ok(()) => self.render(),
                    Err(e) => self.surface(&e),
                }
            }
            "/page" => self.goto_page(args).await,
            "/next" => {
                match self.list.next().await {
                    Ok(()) => self.render(),
                    Err(e) => self.surface(&e),
                }
            }
            "/prev" => {
                match self.list.prev().await {
                    Ok(()) => self.render(),
                    Err(e) => self.surface(&e),
                }
            }
            "/search" => {
                self.list.set_search(args);
                self.screen = Screen::List;
                self.render();
            }
            "/show" => self.show_contact(args).await,
            "/set" => self.set_field(args),
            "/save" => self.save_detail().await,
            "/photo" => self.upload_photo(args).await,
            "/new" => {
                self.draft = Some(ContactForm::new());
                self.render();
            }
            "/submit" => self.submit_draft().await,
            "/cancel" => {
                if self.draft.take().is_some() {
                    self.notifier.info("Draft discarded");
                }
                self.render();
            }
            other => {
                self.notifier
                    .warning(&format!("Unknown command: {}. Try /help.", other));
            }
        }

        Flow::Continue
    }

    /// Plain text searches the list; other screens expect commands
    fn handle_plain(&mut self, input: &str) -> Flow {
        if self.draft.is_some() {
            self.notifier
                .warning("A draft is open. Use /set <field> <value>, /submit, or /cancel.");
        } else if matches!(self.screen, Screen::Detail(_)) {
            self.notifier
                .warning("Use /set <field> <value>, /save, /photo <path>, or /back.");
        } else {
            self.list.set_search(input);
            self.render();
        }
        Flow::Continue
    }

    async fn goto_page(&mut self, args: &str) {
        // Pages are displayed 1-based
        let Some(shown) = args.split_whitespace().next().and_then(|n| n.parse::<u32>().ok())
        else {
            self.notifier.warning("Usage: /page <number>");
            return;
        };
        if shown == 0 {
            self.notifier.warning("Pages start at 1");
            return;
        }
        match self.list.load_page(shown - 1).await {
            Ok(()) => {
                self.screen = Screen::List;
                self.render();
            }
            Err(e) => self.surface(&e),
        }
    }

    async fn show_contact(&mut self, args: &str) {
        let id = args.trim();
        if id.is_empty() {
            self.notifier.warning("Usage: /show <id>");
            return;
        }

        let mut view = DetailView::new(Arc::clone(&self.store));
        match view.fetch(id).await {
            Ok(()) => {
                self.screen = Screen::Detail(view);
                self.render();
            }
            Err(e) => self.surface(&e),
        }
    }

    fn set_field(&mut self, args: &str) {
        let Some((field, value)) = split_field(args) else {
            self.notifier.warning("Usage: /set <field> <value>");
            return;
        };

        if let Some(form) = self.draft.as_mut() {
            form.change(field, value);
            self.render();
            return;
        }

        match &mut self.screen {
            Screen::Detail(view) => {
                view.change(field, value);
                self.render();
            }
            Screen::List => {
                self.notifier
                    .warning("Open a contact with /show <id> or a draft with /new first.");
            }
        }
    }

    async fn save_detail(&mut self) {
        let Screen::Detail(view) = &mut self.screen else {
            self.notifier.warning("No contact open. Use /show <id>.");
            return;
        };

        match view.submit().await {
            Ok(()) => {
                self.notifier.success("Contact updated");
                // Back to the list with fresh data
                self.screen = Screen::List;
                match self.list.refresh().await {
                    Ok(()) => self.render(),
                    Err(e) => self.surface(&e),
                }
            }
            Err(e) => self.surface(&e),
        }
    }

    async fn upload_photo(&mut self, args: &str) {
        let path = args.trim();
        if path.is_empty() {
            self.notifier.warning("Usage: /photo <file>");
            return;
        }

        let file_name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.notifier
                    .error(&format!("Cannot read {}: {}", path, e));
                return;
            }
        };

        if let Some(form) = self.draft.as_mut() {
            form.attach_photo(bytes, file_name);
            self.render();
            return;
        }

        match &mut self.screen {
            Screen::Detail(view) => match view.update_photo(bytes, &file_name).await {
                Ok(()) => {
                    self.notifier.success("Photo updated");
                    self.render();
                }
                Err(e) => self.surface(&e),
            },
            Screen::List => {
                self.notifier
                    .warning("Open a contact with /show <id> or a draft with /new first.");
            }
        }
    }

    async fn submit_draft(&mut self) {
        let Some(form) = self.draft.as_mut() else {
            self.notifier.warning("No draft open. Use /new.");
            return;
        };

        match form.submit(self.store.as_ref()).await {
            Ok(created) => {
                // Close the form, toast, and re-fetch the list
                self.draft = None;
                self.notifier.success(&format!(
                    "Contact created: {}",
                    created.id.as_deref().unwrap_or("?")
                ));
                match self.list.refresh().await {
                    Ok(()) => self.render(),
                    Err(e) => self.surface(&e),
                }
            }
            // The draft stays open so the user can retry
            Err(e) => self.surface(&e),
        }
    }
}

/// Run the interactive console
pub async fn run_repl(config: Config, store: Arc<dyn ContactStore>) -> anyhow::Result<()> {
    let notifier = ConsoleNotifier::new(NotifyConfig {
        duration_ms: config.ui.notify_duration_ms,
    });
    let mut app = Repl::new(store, config.api.page_size, notifier);

    info!("Starting console against {}", config.api.base_url);
    print_welcome();

    // Fetch-on-mount: first page before the first prompt
    match app.list.mount().await {
        Ok(()) => app.render(),
        Err(e) => app.surface(&e),
    }

    let mut keybindings = default_keybindings();

    // Trigger completion on '/' key
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Char('/'),
        ReedlineEvent::Edit(vec![reedline::EditCommand::Complete]),
    );

    let menu = Box::new(
        ColumnarMenu::default()
            .with_name("command_menu")
            .with_columns(1)
            .with_column_width(Some(40))
            .with_only_buffer_difference(false),
    );

    let hinter = DefaultHinter::default().with_style(Style::new().dimmed());

    let mut line_editor = Reedline::create()
        .with_completer(Box::new(CommandCompleter::new()))
        .with_menu(ReedlineMenu::EngineCompleter(menu))
        .with_hinter(Box::new(hinter))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    let prompt = ColoredPrompt::new();

    loop {
        let signal = line_editor.read_line(&prompt);

        match signal {
            Ok(Signal::Success(line)) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if app.handle(input).await == Flow::Exit {
                    break;
                }
            }
            Ok(Signal::CtrlC) => {
                println!("^C");
                continue;
            }
            Ok(Signal::CtrlD) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    println!("Goodbye.");
    Ok(())
}

/// Default keybindings for reedline
fn default_keybindings() -> Keybindings {
    let mut keybindings = Keybindings::new();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::Edit(vec![reedline::EditCommand::Complete]),
    );
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Enter, ReedlineEvent::Submit);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Esc, ReedlineEvent::Esc);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('c'), ReedlineEvent::CtrlC);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('d'), ReedlineEvent::CtrlD);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Up, ReedlineEvent::Up);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Down, ReedlineEvent::Down);
    keybindings
}

fn print_welcome() {
    println!();
    println!("{}", Color::Cyan.bold().paint("SafeLink"));
    println!("Type /help for commands; plain text filters the list by name.");
    println!();
}

fn print_commands() {
    println!();
    for (cmd, desc) in COMMANDS {
        println!("  {:<10} {}", cmd, desc);
    }
    println!();
}

/// Split a line into the command token and its argument remainder
fn split_command(input: &str) -> (&str, &str) {
    match input.find(char::is_whitespace) {
        Some(i) => (&input[..i], input[i..].trim_start()),
        None => (input, ""),
    }
}

/// Split command args into a field name and its value
fn split_field(args: &str) -> Option<(&str, &str)> {
    let args = args.trim();
    if args.is_empty() {
        return None;
    }
    match args.find(char::is_whitespace) {
        Some(i) => Some((&args[..i], args[i..].trim_start())),
        None => Some((args, "")),
    }
}

fn render_list(view: &ListView) -> String {
    let mut out = String::new();

    out.push_str(&format!("Contact List ({})\n", view.total_elements()));

    if let ListState::Failed(message) = view.state() {
        out.push_str(&format!("Could not load contacts: {}\n", message));
        return out;
    }

    if !view.search().is_empty() {
        out.push_str(&format!("Filter: {:?}\n", view.search()));
    }

    let visible = view.visible();
    if view.is_empty() {
        out.push_str("No Contacts. Add a New Contact.\n");
        return out;
    }
    if visible.is_empty() {
        out.push_str("No contacts match the filter on this page.\n");
    }

    for contact in visible {
        out.push_str(&format!(
            "  {}  {:<20} {:<26} {:<14} {}\n",
            contact.id.as_deref().unwrap_or("-"),
            contact.name,
            contact.email,
            contact.phone,
            contact.status,
        ));
    }

    if view.total_pages() > 1 {
        out.push('\n');
        out.push_str(&render_pagination(view));
        out.push('\n');
    }

    out
}

fn render_pagination(view: &ListView) -> String {
    let mut out = String::new();

    out.push_str(if view.can_prev() { "<<  " } else { "--  " });
    for link in view.page_links() {
        if link.active {
            out.push_str(&format!("[{}] ", link.page + 1));
        } else {
            out.push_str(&format!("{} ", link.page + 1));
        }
    }
    out.push_str(if view.can_next() { " >>" } else { " --" });

    out
}

fn render_detail(view: &DetailView) -> String {
    let contact = view.contact();
    let mut out = String::new();

    out.push_str(&format!("Contact {}\n", contact.id.as_deref().unwrap_or("-")));
    out.push_str(&format!("  name:    {}\n", contact.name));
    out.push_str(&format!("  email:   {}\n", contact.email));
    out.push_str(&format!("  phone:   {}\n", contact.phone));
    out.push_str(&format!("  address: {}\n", contact.address));
    out.push_str(&format!("  title:   {}\n", contact.title));
    out.push_str(&format!("  status:  {}\n", contact.status));
    if let Some(url) = &contact.photo_url {
        out.push_str(&format!("  photo:   {}\n", url));
    }
    out.push_str("\nEdit with /set <field> <value>, then /save. /photo <file> replaces the photo.\n");

    out
}

fn render_draft(form: &ContactForm) -> String {
    let contact = form.contact();
    let mut out = String::new();

    out.push_str("New contact (draft)\n");
    out.push_str(&format!("  name:    {}\n", contact.name));
    out.push_str(&format!("  email:   {}\n", contact.email));
    out.push_str(&format!("  phone:   {}\n", contact.phone));
    out.push_str(&format!("  address: {}\n", contact.address));
    out.push_str(&format!("  title:   {}\n", contact.title));
    out.push_str(&format!("  status:  {}\n", contact.status));
    match form.pending_photo() {
        Some(photo) => out.push_str(&format!("  photo:   {} (pending)\n", photo.file_name)),
        None => out.push_str("  photo:   none\n"),
    }
    out.push_str("\nFill with /set <field> <value>, then /submit. /cancel discards.\n");

    out
}
