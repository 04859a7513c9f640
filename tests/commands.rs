//! End-to-end command scripts driven through the public dispatcher, the
//! same way the binary's read loop feeds it.

use cashbook::{dispatch, Store};

fn run_script<'a>(store: &mut Store, lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| dispatch(line, store))
        .collect()
}

#[test]
fn fresh_profile_session() {
    let mut store = Store::new();
    let outputs = run_script(
        &mut store,
        [
            "addnewprof dana hunter2",
            "addcash 1200 salary dana hunter2",
            "addcash 100 salary dana hunter2",
            "addexpense 400 rent dana hunter2",
            "marga dana hunter2",
            "info dana hunter2",
            "removeprof dana hunter2",
            "marga dana hunter2",
        ],
    );

    assert_eq!(
        outputs,
        [
            "User added successfully.",
            "Income added successfully.",
            "Income added successfully.",
            "Expense added successfully.",
            "Total balance for dana: 900",
            "Income:\nsalary: 1300\nExpenses:\nrent: 400",
            "User removed successfully.",
            "Invalid username or password.",
        ]
    );
}

#[test]
fn overdraft_is_refused_and_state_survives() {
    let mut store = Store::with_demo_accounts();
    let outputs = run_script(
        &mut store,
        [
            "marga aaa 1234",
            "addexpense 900 rent aaa 1234",
            "addcash 300 salary aaa 1234",
            "addexpense 900 rent aaa 1234",
            "marga aaa 1234",
        ],
    );

    assert_eq!(
        outputs,
        [
            "Total balance for aaa: 550.0",
            "Insufficient funds. Expense cannot be added.",
            "Income added successfully.",
            "Insufficient funds. Expense cannot be added.",
            "Total balance for aaa: 850.0",
        ]
    );
}

#[test]
fn malformed_lines_never_touch_the_store() {
    let mut store = Store::with_demo_accounts();
    let outputs = run_script(
        &mut store,
        [
            "addcash",
            "addcash ten salary aaa 1234",
            "addexpense -3 rent aaa 1234",
            "withdraw 10 aaa 1234",
            "marga aaa 1234",
        ],
    );

    assert_eq!(
        outputs,
        [
            "Usage: addcash <amount> <category> <username> <password>",
            "Amount must be a number.",
            "Amount must be a positive number.",
            "Unknown command. Type 'help' for a list of commands.",
            "Total balance for aaa: 550.0",
        ]
    );
}

#[test]
fn save_writes_the_snapshot_next_to_the_process() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let mut store = Store::with_demo_accounts();
    assert_eq!(
        dispatch("save bbb 4321", &mut store),
        "Data saved successfully to bbb_data.txt"
    );

    let contents = std::fs::read_to_string(dir.path().join("bbb_data.txt")).unwrap();
    assert_eq!(
        contents,
        "User: bbb\n\
         Income:\n\
         freelance: 1200.0\n\
         Expenses:\n\
         transport: 100.0\n\
         utilities: 300.0\n"
    );
}
