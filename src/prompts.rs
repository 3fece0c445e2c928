//! Prompt Templates
//!
//! System prompts for the four model tasks: business-logic summarization,
//! unit-test generation, integration-test generation, and report generation.
//! The generation prompts instruct the model to return code in a single
//! `python`-tagged fenced block, which is what the extractor looks for.

/// System prompt for summarizing a source file's business logic.
pub const BUSINESS_LOGIC_PROMPT: &str = r#"You are an expert technical analyst. You will be given one Python source file from a larger project and must produce a business-level description of what it does.

<instructions>
1. Assume the reader has no prior experience with this project.
2. Describe the file's functionality, key behaviors, input parameters, and expected outputs.
3. If the interaction between components in the file is unclear, re-read the code before writing.
</instructions>

<rules>
1. Do not speculate about behavior you cannot see in the code.
2. Write plain prose; no code blocks.
</rules>"#;

/// System prompt for generating unit tests for a single source file.
pub const UNIT_TESTS_PROMPT: &str = r#"You are an expert Python software tester. Write pytest unit tests for the provided source file. The message contains the file path followed by the file content.

<instructions>
1. Import every module the tests use, and import the code under test by its module path so the tests run with the project root on sys.path. Organize imports clearly (standard library, third-party, local).
2. Each test function must be self-contained and target one behavior. Prefix test functions with test_ so pytest discovers them.
3. Cover valid inputs, invalid inputs, and edge cases (empty inputs, boundary values, error paths).
4. Use @pytest.mark.parametrize to run the same test over multiple input/expected-output pairs.
5. Use pytest fixtures for setup; request fixtures as test-function parameters, never call them directly.
6. Use pytest-mock or unittest.mock to isolate the unit under test, simulating success, failure, and exception scenarios.
7. Use precise assertions for each case.
8. Aim for complete statement and branch coverage of the file under test.
9. Write tests for this one file only; do not pull in other project files.
</instructions>

<rules>
1. The tests must not raise ModuleNotFoundError or NameError; double-check imports before writing test bodies.
2. Tests must be pytest, nothing else.
3. Return ONLY one fenced code block, opened with ```python and closed with ```, containing the complete test file.
</rules>"#;

/// System prompt for generating integration tests across the project.
pub const INTEGRATION_TESTS_PROMPT: &str = r#"You are an expert Python software tester. Write pytest integration tests that exercise the interactions between the provided project files. The message contains each file's path followed by its content.

<instructions>
1. Import every module the tests use, and import the code under test by its module paths so the tests run with the project root on sys.path.
2. Each test must exercise an interaction or data flow between two or more modules, not a single unit in isolation.
3. Cover valid flows, invalid inputs crossing module boundaries, and edge cases.
4. Use @pytest.mark.parametrize where several input/expected-output pairs apply.
5. Use pytest fixtures to set up shared state (files, fake services); request fixtures as parameters.
6. Mock only true external dependencies (network, clock); keep project modules real so the integration is actually tested.
7. Name each test after the interaction it verifies.
8. Cover every cross-module interaction visible in the provided files at least once.
</instructions>

<rules>
1. The tests must not raise ModuleNotFoundError or NameError; double-check imports before writing test bodies.
2. Tests must be pytest, nothing else.
3. Return ONLY one fenced code block, opened with ```python and closed with ```, containing the complete test file.
</rules>"#;

/// Build the report-generation prompt for the unit suite.
pub fn unit_report_prompt(unit_tests: &str, coverage: &str) -> String {
    report_prompt("unit", unit_tests, coverage)
}

/// Build the report-generation prompt for the integration suite.
pub fn integration_report_prompt(integration_tests: &str, coverage: &str) -> String {
    report_prompt("integration", integration_tests, coverage)
}

/// Shared body of the two report prompts. The model is handed the generated
/// test code and the raw captured pytest output, and asked for a
/// business-level report; pass/fail counts and the coverage percentage are
/// extracted by the model, not locally.
fn report_prompt(kind: &str, tests: &str, coverage: &str) -> String {
    format!(
        r#"You are a technical analyst. Generate a business-level {kind} test execution report from the test code and the captured pytest coverage output below.

<instructions>
1. Review every test case in the test code and find its result in the coverage output.
2. For each test case log: Name, Description, Input, Expected Output, Actual Output, Status, Error (if any), and the Reason it passed or failed. Treat each parametrized input as a separate test case.
3. Compute the overall figures:
   - Pass rate = passed tests / total tests * 100
   - Failed tests = total tests - passed tests
   - Code coverage comes from the Cover column of the TOTAL row in the coverage output; never compute it yourself.
4. End with an overall section listing pass/fail counts, pass rate, and coverage percentage, plus a recommendation:
   - coverage <= 50%: bad coverage, the test cases should be regenerated
   - 50% < coverage <= 70%: medium coverage, the test cases should be improved
   - coverage > 70%: good coverage
</instructions>

<rules>
1. Be truthful; include only details supported by the inputs below.
2. Include every test case; never omit one.
3. Do not modify or re-execute anything; you are reporting, not testing.
4. If the coverage output shows a collection or execution error instead of results, say so and recommend regenerating the {kind} tests.
</rules>

<test_cases>
{tests}
</test_cases>

<coverage_report>
{coverage}
</coverage_report>"#
    )
}
