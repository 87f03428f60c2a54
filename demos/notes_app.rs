//! Notes App Navigation
//!
//! This demo walks a small notes app through the navigator.
//!
//! Key concepts:
//! - Declaring screens with `screen_enum!`
//! - A listener that completes some transitions later
//! - Queued operations waiting for the running animation
//! - Popping back to a screen already on the backstack
//!
//! Run with: cargo run --example notes_app

use backstack::core::{Animator, TransitionAnimator};
use backstack::navigator::{Completion, Listener};
use backstack::{screen_enum, NavigatorBuilder, Screen};
use std::cell::RefCell;
use std::rc::Rc;

screen_enum! {
    enum NotesScreen {
        NoteList,
        NoteDetail,
        EditNote,
        Drawer,
    }
    consumes_back: [Drawer]
}

#[derive(Debug)]
struct Slide;

impl TransitionAnimator for Slide {
    fn name(&self) -> &str {
        "slide"
    }
}

/// Prints every notification and parks completions until `finish_animations`.
#[derive(Default)]
struct Console {
    running: RefCell<Vec<Completion<NotesScreen>>>,
}

impl Console {
    fn animate(&self, kind: &str, screen: &NotesScreen, animator: Option<&Animator>, done: Completion<NotesScreen>) {
        let animator = animator.map(|a| a.name()).unwrap_or("none");
        println!("  {kind:<8} -> {} (animator: {animator})", screen.name());
        self.running.borrow_mut().push(done);
    }

    fn finish_animations(&self) {
        loop {
            let next = self.running.borrow_mut().pop();
            match next {
                Some(done) => {
                    println!("  animation finished");
                    done.complete().unwrap();
                }
                None => break,
            }
        }
    }
}

impl Listener<NotesScreen> for Console {
    fn screen_pushed(&self, screen: &NotesScreen) {
        println!("  pushed    {}", screen.name());
    }

    fn screen_popped(&self, screen: &NotesScreen) {
        println!("  popped    {}", screen.name());
    }

    fn forward(&self, screen: &NotesScreen, animator: Option<&Animator>, done: Completion<NotesScreen>) {
        self.animate("forward", screen, animator, done);
    }

    fn backward(&self, screen: &NotesScreen, animator: Option<&Animator>, done: Completion<NotesScreen>) {
        self.animate("backward", screen, animator, done);
    }

    fn replace(&self, screen: &NotesScreen, animator: Option<&Animator>, done: Completion<NotesScreen>) {
        self.animate("replace", screen, animator, done);
    }
}

fn print_backstack(navigator: &backstack::Navigator<NotesScreen>) {
    let names: Vec<_> = navigator.backstack().iter().map(|s| s.name().to_string()).collect();
    println!("Backstack: [{}]\n", names.join(", "));
}

fn main() {
    println!("=== Notes App Navigation ===\n");

    let console = Rc::new(Console::default());
    let listener: Rc<dyn Listener<NotesScreen>> = console.clone();
    let navigator = NavigatorBuilder::new().listener(listener).build();
    let slide: Animator = Rc::new(Slide);

    println!("Start with the note list:");
    navigator.start_with(NotesScreen::NoteList, None).unwrap();
    console.finish_animations();
    print_backstack(&navigator);

    println!("Open a note, then edit it before the first animation ends:");
    navigator.go_to(NotesScreen::NoteDetail, Some(slide.clone())).unwrap();
    navigator.go_to(NotesScreen::EditNote, Some(slide)).unwrap();
    println!("  ({} operation waiting)", navigator.pending_transitions());
    console.finish_animations();
    print_backstack(&navigator);

    println!("Save and pop back to the list:");
    navigator.pop_to(NotesScreen::NoteList, None).unwrap();
    console.finish_animations();
    print_backstack(&navigator);

    println!("Open the drawer; back closes it in place:");
    navigator.go_to(NotesScreen::Drawer, None).unwrap();
    console.finish_animations();
    println!("  back handled: {}", navigator.handle_back().unwrap());
    print_backstack(&navigator);

    println!("History:");
    for record in navigator.history().records() {
        println!(
            "  {:<8} {} -> {} (depth {})",
            record.kind.to_string(),
            record.from.as_deref().unwrap_or("-"),
            record.to,
            record.depth
        );
    }

    println!("\n=== Demo Complete ===");
}
