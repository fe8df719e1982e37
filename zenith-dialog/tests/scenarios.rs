//! End-to-end behaviour of the three dialog variants.
//!
//! Each test plays the part of both the caller code and the renderer: the
//! renderer side waits for the dialog to appear and then answers through a
//! `ConfirmResponder`, exactly as a button handler would.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use zenith_dialog::{
    ConfirmCallbacks, ConfirmDialog, ConfirmPhase, ConfirmResult, CustomDialog, DialogError,
    DialogHandle, LoadingDialog, UiScope, Visuals,
};

/// Renderer stand-in: wait until shown, then answer.
async fn answer_when_shown(dialog: &ConfirmDialog, result: ConfirmResult) {
    let mut shown = dialog.subscribe();
    shown.wait_for(|v| *v).await.unwrap();
    dialog.responder().resolve(result);
}

async fn wait_hidden(dialog: &impl DialogHandle) {
    let mut shown = dialog.subscribe();
    shown.wait_for(|v| !*v).await.unwrap();
}

#[tokio::test]
async fn scenario_a_await_then_confirm() {
    let scope = UiScope::new();
    let dialog = ConfirmDialog::new(&scope, ConfirmCallbacks::new());

    let (result, _) = tokio::join!(
        dialog.await_confirm(Visuals::new("Delete?")),
        answer_when_shown(&dialog, ConfirmResult::Confirmed),
    );

    assert_eq!(result, Ok(ConfirmResult::Confirmed));
    wait_hidden(&dialog).await;
    assert!(!dialog.is_shown());
}

#[tokio::test]
async fn scenario_b_show_then_dismiss_fires_callback_once() {
    let scope = UiScope::new();
    let dismissed = Arc::new(AtomicUsize::new(0));
    let dialog = ConfirmDialog::new(
        &scope,
        ConfirmCallbacks::new().on_dismiss({
            let dismissed = dismissed.clone();
            move || {
                dismissed.fetch_add(1, Ordering::SeqCst);
            }
        }),
    );

    dialog.show_confirm(Visuals::new("Proceed?"));
    answer_when_shown(&dialog, ConfirmResult::Canceled).await;
    wait_hidden(&dialog).await;

    assert_eq!(dismissed.load(Ordering::SeqCst), 1);
    assert!(!dialog.is_awaiting());
    assert!(!dialog.is_shown());
}

#[tokio::test]
async fn scenario_c_scope_cancel_while_awaiting() {
    let scope = UiScope::new();
    let dialog = ConfirmDialog::new(&scope, ConfirmCallbacks::new());

    let cancel = async {
        let mut shown = dialog.subscribe();
        shown.wait_for(|v| *v).await.unwrap();
        scope.cancel();
    };
    let (result, _) = tokio::join!(dialog.await_confirm(Visuals::new("Flash kernel?")), cancel);

    assert_eq!(result, Err(DialogError::Cancelled));
    assert!(!dialog.is_shown());
    assert!(!dialog.is_awaiting());
}

#[tokio::test]
async fn scenario_c_scope_cancel_with_callbacks_leaves_dialog() {
    let scope = UiScope::new();
    let dialog = ConfirmDialog::new(&scope, ConfirmCallbacks::new().on_confirm(|| {}));

    let cancel = async {
        let mut shown = dialog.subscribe();
        shown.wait_for(|v| *v).await.unwrap();
        scope.cancel();
    };
    let (result, _) = tokio::join!(dialog.await_confirm(Visuals::new("Flash kernel?")), cancel);

    assert_eq!(result, Err(DialogError::Cancelled));
    assert!(dialog.is_shown(), "callback flow owns visibility");
}

#[tokio::test]
async fn scenario_d_sequential_loading_alternates() {
    let scope = UiScope::new();
    let loading = LoadingDialog::new(&scope);
    let observer = loading.clone();

    let mut trace = vec![loading.is_shown()];
    for _ in 0..2 {
        let inside = loading.with_loading(async { observer.is_shown() }).await;
        trace.push(inside);
        trace.push(loading.is_shown());
    }

    assert_eq!(trace, vec![false, true, false, true, false]);
}

#[tokio::test]
async fn loading_restores_visibility_on_error_and_success() {
    let scope = UiScope::new();
    let loading = LoadingDialog::new(&scope);

    for fail in [false, true, false] {
        let before = loading.is_shown();
        let out = loading
            .with_loading(async move {
                tokio::task::yield_now().await;
                if fail { Err("write failed") } else { Ok(()) }
            })
            .await;
        assert_eq!(out.is_err(), fail);
        assert_eq!(loading.is_shown(), before);
    }
}

#[tokio::test]
async fn show_hide_sequences_settle_on_last_call() {
    let scope = UiScope::new();
    let dialog = CustomDialog::new(&scope);

    let sequences: &[&[bool]] = &[
        &[true],
        &[true, false],
        &[false, false, true],
        &[true, true, false, true],
        &[false, true, false, true, false, false],
    ];
    for sequence in sequences {
        for &show in sequence.iter() {
            if show {
                dialog.show();
            } else {
                dialog.hide();
            }
        }
        scope.flush().await;
        assert_eq!(dialog.is_shown(), *sequence.last().unwrap(), "{sequence:?}");
    }
}

#[tokio::test]
async fn each_request_takes_the_first_answer_dispatched() {
    let scope = UiScope::new();
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let callbacks = {
        let on_confirm = seen.clone();
        let on_dismiss = seen.clone();
        ConfirmCallbacks::new()
            .on_confirm(move || on_confirm.lock().unwrap().push(ConfirmResult::Confirmed))
            .on_dismiss(move || on_dismiss.lock().unwrap().push(ConfirmResult::Canceled))
    };
    let dialog = ConfirmDialog::new(&scope, callbacks);
    let responder = dialog.responder();

    let order = [
        ConfirmResult::Confirmed,
        ConfirmResult::Canceled,
        ConfirmResult::Canceled,
        ConfirmResult::Confirmed,
    ];
    for (i, &first) in order.iter().enumerate() {
        dialog.show_confirm(Visuals::new(format!("Request {i}")));
        scope.flush().await;

        // A late answer right behind the first one is dropped
        let late = if first.is_confirmed() {
            ConfirmResult::Canceled
        } else {
            ConfirmResult::Confirmed
        };
        responder.resolve(first);
        responder.resolve(late);
        wait_hidden(&dialog).await;
    }

    // Let the last late answer drain
    dialog.show_confirm(Visuals::new("Done?"));
    scope.flush().await;
    responder.confirm();
    wait_hidden(&dialog).await;

    let mut expected = order.to_vec();
    expected.push(ConfirmResult::Confirmed);
    assert_eq!(*seen.lock().unwrap(), expected);
}

#[tokio::test]
async fn no_result_is_delivered_without_a_request() {
    let scope = UiScope::new();
    let fired = Arc::new(AtomicUsize::new(0));
    let dialog = ConfirmDialog::new(
        &scope,
        ConfirmCallbacks::new().on_confirm({
            let fired = fired.clone();
            move || {
                fired.fetch_add(1, Ordering::SeqCst);
            }
        }),
    );

    dialog.responder().confirm();
    dialog.responder().confirm();
    scope.flush().await;

    dialog.show_confirm(Visuals::new("Start service?"));
    scope.flush().await;
    assert!(dialog.is_shown());
    assert_eq!(dialog.phase(), ConfirmPhase::AwaitingInput);

    answer_when_shown(&dialog, ConfirmResult::Confirmed).await;
    wait_hidden(&dialog).await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn dismiss_resolves_await_as_canceled_and_handle_is_reusable() {
    let scope = UiScope::new();
    let dialog = ConfirmDialog::new(&scope, ConfirmCallbacks::new());

    for (answer, title) in [
        (ConfirmResult::Canceled, "Disable thermal limits?"),
        (ConfirmResult::Confirmed, "Apply renderer change?"),
    ] {
        let (result, _) = tokio::join!(
            dialog.await_confirm(Visuals::new(title)),
            answer_when_shown(&dialog, answer),
        );
        assert_eq!(result, Ok(answer));
        wait_hidden(&dialog).await;
        scope.flush().await;
        assert_eq!(dialog.phase(), ConfirmPhase::Idle);
    }
}

#[tokio::test]
async fn caller_side_timeout_withdraws_request() {
    let scope = UiScope::new();
    let dialog = ConfirmDialog::new(&scope, ConfirmCallbacks::new());

    let outcome = tokio::time::timeout(
        std::time::Duration::from_millis(10),
        dialog.await_confirm(Visuals::new("Still there?")),
    )
    .await;

    assert!(outcome.is_err());
    assert!(!dialog.is_awaiting());
    scope.flush().await;
    assert!(!dialog.is_shown());
}
