use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

use dt_api::{ChatWidget, ChatWidgetOptions, RedirectRule, RedirectRules};
use dt_core::{DialogTreeError, ErrorKind};
use dt_parser::LoadOptions;

use crate::{
    map_cli_json, map_tui_io, FileTreeSource, PlayArgs, PlayCommandAction, HELP_LINE,
};

pub(crate) fn run_play(args: PlayArgs) -> Result<i32, DialogTreeError> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    run_play_with_io(args, &mut reader, &mut writer)
}

/// URLs opened by redirect rules, drained into the play output.
pub(crate) type RedirectSink = Arc<Mutex<Vec<String>>>;

pub(crate) fn build_widget(
    args: &PlayArgs,
) -> Result<(ChatWidget, RedirectSink), DialogTreeError> {
    let sink = RedirectSink::default();
    let opened = Arc::clone(&sink);
    let mut redirects = RedirectRules::new(move |url| {
        if let Ok(mut urls) = opened.lock() {
            urls.push(url.to_string());
        }
    });
    for raw in &args.redirects {
        redirects = redirects.with_rule(RedirectRule::parse(raw)?);
    }

    let widget = ChatWidget::new(ChatWidgetOptions {
        load_options: LoadOptions {
            strict_references: args.strict,
        },
        observer: Some(Arc::new(redirects)),
    });
    Ok((widget, sink))
}

pub(crate) fn run_play_with_io(
    args: PlayArgs,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<i32, DialogTreeError> {
    let (mut widget, redirects) = build_widget(&args)?;
    widget.load_from(&FileTreeSource::new(args.tree.clone()))?;

    emit(writer, "dialogtree")?;
    emit(writer, HELP_LINE)?;

    let mut printed = 0usize;
    loop {
        emit_redirects(&redirects, writer)?;
        printed = emit_new_entries(&widget, printed, writer)?;

        let engine = widget.engine()?;
        if engine.is_finished() {
            emit(writer, "[END]")?;
            break;
        }

        let choices = engine.choices();
        for choice in &choices {
            emit(writer, &format!("  [{}] {}", choice.key, choice.text))?;
        }
        let options = engine.options();
        if !options.is_empty() {
            let listed = options
                .iter()
                .map(|option| format!("{}={}", option.key, option.text))
                .collect::<Vec<_>>()
                .join(", ");
            emit(writer, &format!("options: {}", listed))?;
        }

        let Some(raw) = prompt_input_from("> ", reader, writer)? else {
            break;
        };

        match handle_play_command(raw.trim(), &mut widget, writer)? {
            PlayCommandAction::Continue => continue,
            PlayCommandAction::RefreshTranscript => {
                printed = 0;
                continue;
            }
            PlayCommandAction::Quit => break,
            PlayCommandAction::NotHandled => {}
        }

        let result = if choices.is_empty() {
            widget.set_draft(raw);
            widget.submit_draft()
        } else {
            match raw.trim().parse::<usize>() {
                Ok(index) => widget.select_answer_at(index),
                Err(_) => Err(DialogTreeError::state(
                    "TUI_CHOICE_PARSE",
                    format!("Invalid choice index: {}", raw),
                )),
            }
        };

        match result {
            Ok(()) => {}
            Err(error) if error.kind == ErrorKind::Validation => {
                let message = widget.engine()?.message().to_string();
                emit(writer, &format!("! {}", message))?;
            }
            Err(error) if error.kind == ErrorKind::State => {
                emit(writer, &format!("! {}", error.message))?;
            }
            Err(error) => {
                emit_redirects(&redirects, writer)?;
                emit_new_entries(&widget, printed, writer)?;
                if args.transcript_json {
                    emit_transcript(&widget, writer)?;
                }
                return Err(error);
            }
        }
    }

    if args.transcript_json {
        emit_transcript(&widget, writer)?;
    }
    Ok(0)
}

pub(crate) fn handle_play_command(
    raw: &str,
    widget: &mut ChatWidget,
    writer: &mut dyn Write,
) -> Result<PlayCommandAction, DialogTreeError> {
    match raw {
        ":help" => {
            emit(writer, HELP_LINE)?;
            Ok(PlayCommandAction::Continue)
        }
        ":log" => {
            let entries = widget.engine()?.log().snapshot();
            let json = serde_json::to_string(&entries).map_err(map_cli_json)?;
            emit(writer, &json)?;
            Ok(PlayCommandAction::Continue)
        }
        ":vars" => {
            for (key, value) in widget.engine()?.variables().iter() {
                emit(writer, &format!("{} = {}", key, value))?;
            }
            Ok(PlayCommandAction::Continue)
        }
        ":restart" => {
            widget.engine_mut()?.restart()?;
            emit(writer, "restarted")?;
            Ok(PlayCommandAction::RefreshTranscript)
        }
        ":min" => {
            let minimized = widget.toggle_minimized();
            emit(writer, &format!("minimized: {}", minimized))?;
            Ok(PlayCommandAction::Continue)
        }
        ":quit" => {
            emit(writer, "bye")?;
            Ok(PlayCommandAction::Quit)
        }
        _ => Ok(PlayCommandAction::NotHandled),
    }
}

/// Returns `None` at end of input.
pub(crate) fn prompt_input_from(
    prefix: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<Option<String>, DialogTreeError> {
    write!(writer, "{}", prefix).map_err(map_tui_io)?;
    writer.flush().map_err(map_tui_io)?;
    let mut input = String::new();
    let read = reader.read_line(&mut input).map_err(map_tui_io)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

fn emit_new_entries(
    widget: &ChatWidget,
    printed: usize,
    writer: &mut dyn Write,
) -> Result<usize, DialogTreeError> {
    let entries = widget.engine()?.log().entries();
    for entry in entries.iter().skip(printed) {
        emit(writer, &format!("[{}] {}", entry.speaker.as_str(), entry.text))?;
    }
    Ok(entries.len())
}

fn emit_redirects(sink: &RedirectSink, writer: &mut dyn Write) -> Result<(), DialogTreeError> {
    let urls = match sink.lock() {
        Ok(mut urls) => std::mem::take(&mut *urls),
        Err(_) => Vec::new(),
    };
    for url in urls {
        emit(writer, &format!("REDIRECT:{}", url))?;
    }
    Ok(())
}

fn emit_transcript(widget: &ChatWidget, writer: &mut dyn Write) -> Result<(), DialogTreeError> {
    let entries = widget.engine()?.log().snapshot();
    let json = serde_json::to_string(&entries).map_err(map_cli_json)?;
    emit(writer, &format!("TRANSCRIPT_JSON:{}", json))
}

fn emit(writer: &mut dyn Write, line: &str) -> Result<(), DialogTreeError> {
    writeln!(writer, "{}", line).map_err(map_tui_io)
}
